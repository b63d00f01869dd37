//! Dashboard rendering logic using ratatui.
//!
//! Handles layout, formatting, and color coding: a header with the run
//! state, the configuration controls, the quality panel with the R-factor
//! gauge, the rolling metrics chart, and a status/help bar.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph},
    Frame,
};

use super::state::{ConfigField, DashState};
use crate::sample::VOICE_BANDWIDTH_KBPS;

/// Get color for a MOS value.
///
/// Bands match the status thresholds: Excellent green, Good blue, Fair
/// yellow, Poor light red, Bad red.
pub fn mos_color(mos: f64) -> Color {
    if mos >= 4.0 {
        Color::Green
    } else if mos >= 3.5 {
        Color::Blue
    } else if mos >= 3.0 {
        Color::Yellow
    } else if mos >= 2.0 {
        Color::LightRed
    } else {
        Color::Red
    }
}

/// Get color for the R-factor gauge.
///
/// - Green: >= 80 (toll quality)
/// - Yellow: 60-79 (users may notice impairment)
/// - Red: < 60 (many users dissatisfied)
pub fn r_factor_color(r_factor: u8) -> Color {
    if r_factor >= 80 {
        Color::Green
    } else if r_factor >= 60 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Format a MOS with 2 decimal places.
pub fn format_mos(mos: f64) -> String {
    format!("{:.2}", mos)
}

/// Minimal mode threshold in columns.
const MINIMAL_MODE_THRESHOLD: u16 = 70;

/// Check if minimal mode should be used based on terminal width.
pub fn is_minimal_mode(width: u16) -> bool {
    width < MINIMAL_MODE_THRESHOLD
}

/// Render the dashboard to the terminal.
///
/// Narrow terminals drop the chart and keep only the controls and the
/// quality read-out.
pub fn render_frame(frame: &mut Frame, state: &DashState) {
    if is_minimal_mode(frame.area().width) {
        render_minimal_frame(frame, state);
    } else {
        render_normal_frame(frame, state);
    }
}

/// Render the normal (full-width) dashboard layout.
fn render_normal_frame(frame: &mut Frame, state: &DashState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Header
            Constraint::Min(12),    // Controls/quality + chart
            Constraint::Length(2),  // Current status row
            Constraint::Length(1),  // Help bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], state);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(30)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(6)])
        .split(columns[0]);

    render_controls(frame, left[0], state);
    render_quality(frame, left[1], state);
    render_chart(frame, columns[1], state);

    render_status_row(frame, chunks[2], state);
    render_help_bar(frame, chunks[3]);
}

/// Render the minimal layout for narrow terminals.
pub fn render_minimal_frame(frame: &mut Frame, state: &DashState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(8),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], state);
    render_controls(frame, chunks[1], state);
    render_quality(frame, chunks[2], state);
    render_help_bar(frame, chunks[3]);
}

/// Render the title line with the run state and tick counter.
fn render_header(frame: &mut Frame, area: Rect, state: &DashState) {
    let (run_text, run_style) = if state.running {
        ("● running", Style::default().fg(Color::Green))
    } else {
        ("■ stopped", Style::default().fg(Color::DarkGray))
    };

    let line = Line::from(vec![
        Span::styled(
            "VoIP Network Quality Simulator",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(run_text, run_style),
        Span::styled(
            format!("  tick {}", state.tick),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(line), inner);
}

/// Render the configuration controls with the selection cursor.
pub fn render_controls(frame: &mut Frame, area: Rect, state: &DashState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Network Configuration ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = ConfigField::ALL
        .iter()
        .map(|field| {
            let selected = *field == state.selected;
            let cursor = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            Line::from(vec![
                Span::styled(cursor, style),
                Span::styled(format!("{:<13}", field.label()), style),
                Span::styled(field.value_text(&state.config), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the voice-quality panel: MOS, status, and the R-factor gauge.
pub fn render_quality(frame: &mut Frame, area: Rect, state: &DashState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Voice Quality ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let color = mos_color(state.quality.mos);
    let mos_lines = vec![
        Line::from(vec![
            Span::styled("MOS ", Style::default().fg(Color::White)),
            Span::styled(
                format_mos(state.quality.mos),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", state.quality.status.label()),
                Style::default().fg(color),
            ),
        ]),
        Line::from(Span::styled(
            format!("QoS {}", if state.config.qos_enabled { "enabled" } else { "disabled" }),
            Style::default().fg(if state.config.qos_enabled {
                Color::Green
            } else {
                Color::DarkGray
            }),
        )),
    ];
    frame.render_widget(Paragraph::new(mos_lines), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(r_factor_color(state.quality.r_factor)))
        .percent(state.quality.r_factor as u16)
        .label(format!("R-Factor {}", state.quality.r_factor));
    frame.render_widget(gauge, rows[1]);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("Codec G.711 ({} kbps)", VOICE_BANDWIDTH_KBPS),
            Style::default().fg(Color::DarkGray),
        ))),
        rows[2],
    );
}

/// Render the rolling loss/jitter/latency chart.
pub fn render_chart(frame: &mut Frame, area: Rect, state: &DashState) {
    let series = &state.series;

    let datasets = vec![
        Dataset::default()
            .name("Loss (%)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&series.loss),
        Dataset::default()
            .name("Jitter (ms)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&series.jitter),
        Dataset::default()
            .name("Latency (ms)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Blue))
            .data(&series.latency),
    ];

    let [x_lo, x_hi] = series.x_bounds();
    let y_hi = series.y_upper();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Network Performance Over Time "),
        )
        .x_axis(
            Axis::default()
                .title("ticks")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([x_lo, x_hi])
                .labels([format!("{:.0}", x_lo), format!("{:.0}", x_hi)]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, y_hi])
                .labels([
                    "0".to_string(),
                    format!("{:.0}", y_hi / 2.0),
                    format!("{:.0}", y_hi),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Render the latest-sample read-out below the chart.
pub fn render_status_row(frame: &mut Frame, area: Rect, state: &DashState) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = match &state.latest {
        Some(sample) => Line::from(vec![
            Span::styled("Load ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{}%", sample.network_load_pct),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled("  Link ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{} kbps", sample.bandwidth_kbps),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled("  Loss ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{:.2}%", sample.packet_loss_pct),
                Style::default().fg(Color::Red),
            ),
            Span::styled("  Jitter ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{:.1} ms", sample.jitter_ms),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled("  Latency ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{} ms", sample.latency_ms),
                Style::default().fg(Color::Blue),
            ),
        ]),
        None => Line::from(Span::styled(
            "press space to start the simulation",
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(line), inner);
}

/// Render the key-binding help bar.
fn render_help_bar(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(Span::styled(
        "space start/stop  r reset  up/down select  left/right adjust  q quit",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, area);
}
