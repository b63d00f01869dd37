//! Dashboard state management.
//!
//! Holds everything the renderer needs for a frame: the latest sample and
//! quality, the chart series extracted from the history window, and which
//! configuration control is selected for keyboard adjustment.

use crate::config::SimulationConfig;
use crate::driver::SimulationDriver;
use crate::history::HISTORY_CAPACITY;
use crate::results::WindowSummary;
use crate::sample::NetworkSample;
use crate::scoring::QualityResult;

/// The configuration controls, in display order.
///
/// These stand in for the sliders of a graphical front-end: up/down moves
/// the selection, left/right adjusts the selected control by its step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    /// Link bandwidth control
    Bandwidth,
    /// Packet loss control
    PacketLoss,
    /// Jitter control
    Jitter,
    /// Base latency control
    Latency,
    /// QoS on/off toggle
    Qos,
}

impl ConfigField {
    /// All fields in display order.
    pub const ALL: [ConfigField; 5] = [
        ConfigField::Bandwidth,
        ConfigField::PacketLoss,
        ConfigField::Jitter,
        ConfigField::Latency,
        ConfigField::Qos,
    ];

    /// Display label for the control.
    pub fn label(&self) -> &'static str {
        match self {
            ConfigField::Bandwidth => "Bandwidth",
            ConfigField::PacketLoss => "Packet Loss",
            ConfigField::Jitter => "Jitter",
            ConfigField::Latency => "Base Latency",
            ConfigField::Qos => "QoS",
        }
    }

    /// The field below this one, wrapping at the bottom.
    pub fn next(&self) -> ConfigField {
        match self {
            ConfigField::Bandwidth => ConfigField::PacketLoss,
            ConfigField::PacketLoss => ConfigField::Jitter,
            ConfigField::Jitter => ConfigField::Latency,
            ConfigField::Latency => ConfigField::Qos,
            ConfigField::Qos => ConfigField::Bandwidth,
        }
    }

    /// The field above this one, wrapping at the top.
    pub fn prev(&self) -> ConfigField {
        match self {
            ConfigField::Bandwidth => ConfigField::Qos,
            ConfigField::PacketLoss => ConfigField::Bandwidth,
            ConfigField::Jitter => ConfigField::PacketLoss,
            ConfigField::Latency => ConfigField::Jitter,
            ConfigField::Qos => ConfigField::Latency,
        }
    }

    /// Adjust this control on the given config by one step.
    ///
    /// `up` is the right-arrow direction; for the QoS toggle either
    /// direction flips it.
    pub fn adjust(&self, config: &mut SimulationConfig, up: bool) {
        match self {
            ConfigField::Bandwidth => config.step_bandwidth(up),
            ConfigField::PacketLoss => config.step_loss(up),
            ConfigField::Jitter => config.step_jitter(up),
            ConfigField::Latency => config.step_latency(up),
            ConfigField::Qos => config.toggle_qos(),
        }
    }

    /// Current value of this control, formatted for display.
    pub fn value_text(&self, config: &SimulationConfig) -> String {
        match self {
            ConfigField::Bandwidth => format!("{} kbps", config.bandwidth_kbps),
            ConfigField::PacketLoss => format!("{:.1} %", config.packet_loss_pct),
            ConfigField::Jitter => format!("{:.0} ms", config.jitter_ms),
            ConfigField::Latency => format!("{:.0} ms", config.latency_ms),
            ConfigField::Qos => {
                if config.qos_enabled { "enabled" } else { "disabled" }.to_string()
            }
        }
    }
}

/// Per-metric chart series over the rolling window.
#[derive(Debug, Clone, Default)]
pub struct ChartSeries {
    /// (tick, loss %) points, oldest-first
    pub loss: Vec<(f64, f64)>,
    /// (tick, jitter ms) points, oldest-first
    pub jitter: Vec<(f64, f64)>,
    /// (tick, latency ms) points, oldest-first
    pub latency: Vec<(f64, f64)>,
}

impl ChartSeries {
    /// Inclusive x-axis bounds covering the window, padded to the full
    /// window width so the chart does not rescale while filling up.
    pub fn x_bounds(&self) -> [f64; 2] {
        let last = self.latency.last().map(|p| p.0).unwrap_or(0.0);
        let first = last - (HISTORY_CAPACITY as f64 - 1.0);
        [first.max(0.0), last.max(HISTORY_CAPACITY as f64 - 1.0)]
    }

    /// Upper y-axis bound with headroom over the largest plotted value.
    pub fn y_upper(&self) -> f64 {
        let max = self
            .loss
            .iter()
            .chain(self.jitter.iter())
            .chain(self.latency.iter())
            .map(|p| p.1)
            .fold(0.0f64, f64::max);

        // Round up to the next 25 so the axis labels stay readable.
        ((max / 25.0).floor() + 1.0) * 25.0
    }
}

/// State for the dashboard display.
#[derive(Debug, Clone)]
pub struct DashState {
    /// Whether the driver is currently running
    pub running: bool,
    /// Ticks completed since the last reset
    pub tick: u64,
    /// Configuration as currently set by the operator
    pub config: SimulationConfig,
    /// Which control the selection cursor is on
    pub selected: ConfigField,
    /// Newest sample, if any tick has fired
    pub latest: Option<NetworkSample>,
    /// Quality of the newest sample (default before the first tick)
    pub quality: QualityResult,
    /// Chart series extracted from the history window
    pub series: ChartSeries,
    /// Aggregates over the window for the summary row
    pub window: WindowSummary,
}

impl DashState {
    /// Initial state mirroring a freshly constructed driver.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            running: false,
            tick: 0,
            config,
            selected: ConfigField::Bandwidth,
            latest: None,
            quality: QualityResult::default(),
            series: ChartSeries::default(),
            window: WindowSummary::from_history(
                &crate::history::SampleHistory::new(),
            ),
        }
    }

    /// Refresh everything the renderer shows from the driver.
    pub fn refresh_from(&mut self, driver: &SimulationDriver) {
        self.running = driver.is_running();
        self.tick = driver.current_tick();
        self.config = driver.config().clone();
        self.latest = driver.history().latest().cloned();
        self.quality = driver.quality().clone();
        self.series = ChartSeries {
            loss: driver.history().series(|s| s.packet_loss_pct),
            jitter: driver.history().series(|s| s.jitter_ms),
            latency: driver.history().series(|s| s.latency_ms as f64),
        };
        self.window = WindowSummary::from_history(driver.history());
    }

    /// Move the control selection down.
    pub fn select_next(&mut self) {
        self.selected = self.selected.next();
    }

    /// Move the control selection up.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.prev();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::CallStatus;

    #[test]
    fn test_field_cycle_covers_all_controls() {
        let mut field = ConfigField::Bandwidth;
        let mut seen = Vec::new();
        for _ in 0..ConfigField::ALL.len() {
            seen.push(field);
            field = field.next();
        }
        assert_eq!(seen, ConfigField::ALL);
        assert_eq!(field, ConfigField::Bandwidth);
    }

    #[test]
    fn test_prev_is_inverse_of_next() {
        for field in ConfigField::ALL {
            assert_eq!(field.next().prev(), field);
            assert_eq!(field.prev().next(), field);
        }
    }

    #[test]
    fn test_adjust_dispatches_to_the_right_control() {
        let mut config = SimulationConfig::default();

        ConfigField::Bandwidth.adjust(&mut config, true);
        assert_eq!(config.bandwidth_kbps, 1064);

        ConfigField::PacketLoss.adjust(&mut config, true);
        assert_eq!(config.packet_loss_pct, 0.1);

        ConfigField::Jitter.adjust(&mut config, true);
        assert_eq!(config.jitter_ms, 1.0);

        ConfigField::Latency.adjust(&mut config, false);
        assert_eq!(config.latency_ms, 15.0);

        ConfigField::Qos.adjust(&mut config, true);
        assert!(config.qos_enabled);
        ConfigField::Qos.adjust(&mut config, false);
        assert!(!config.qos_enabled);
    }

    #[test]
    fn test_value_text() {
        let config = SimulationConfig::default();
        assert_eq!(ConfigField::Bandwidth.value_text(&config), "1000 kbps");
        assert_eq!(ConfigField::PacketLoss.value_text(&config), "0.0 %");
        assert_eq!(ConfigField::Latency.value_text(&config), "20 ms");
        assert_eq!(ConfigField::Qos.value_text(&config), "disabled");
    }

    #[test]
    fn test_new_state_matches_reset_defaults() {
        let state = DashState::new(SimulationConfig::default());
        assert!(!state.running);
        assert_eq!(state.tick, 0);
        assert!(state.latest.is_none());
        assert_eq!(state.quality.mos, 4.5);
        assert_eq!(state.quality.status, CallStatus::Excellent);
        assert!(state.series.latency.is_empty());
    }

    #[test]
    fn test_refresh_mirrors_driver() {
        let mut driver = crate::driver::SimulationDriver::new(
            SimulationConfig::default(),
            Some(5),
        );
        driver.start();
        for _ in 0..8 {
            driver.tick();
        }

        let mut state = DashState::new(SimulationConfig::default());
        state.refresh_from(&driver);

        assert!(state.running);
        assert_eq!(state.tick, 8);
        assert_eq!(state.series.latency.len(), 8);
        assert_eq!(state.latest.as_ref().map(|s| s.time), Some(8));
        assert_eq!(&state.quality, driver.quality());
    }

    #[test]
    fn test_chart_bounds() {
        let mut series = ChartSeries::default();
        assert_eq!(series.x_bounds(), [0.0, 29.0]);

        series.latency = vec![(40.0, 100.0), (41.0, 180.0)];
        series.loss = vec![(40.0, 2.0)];
        let [lo, hi] = series.x_bounds();
        assert_eq!(hi, 41.0);
        assert_eq!(lo, 12.0);

        // 180 rounds up to the next multiple of 25.
        assert_eq!(series.y_upper(), 200.0);
    }

    #[test]
    fn test_y_upper_never_collapses_to_zero() {
        let series = ChartSeries::default();
        assert!(series.y_upper() >= 25.0);
    }
}
