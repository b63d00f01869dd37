//! Display mode detection.
//!
//! Decides between the interactive dashboard, a plain-text headless run,
//! and structured JSON output, based on CLI flags and whether stdout is a
//! terminal.

/// The display mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Interactive dashboard with live chart and controls
    Tui,
    /// Headless run printing a plain-text summary
    Headless,
    /// Headless run printing a JSON report
    Json,
}

impl DisplayMode {
    /// Determine display mode from CLI flags and environment.
    ///
    /// `--json` wins regardless of TTY-ness; otherwise an interactive
    /// terminal gets the dashboard and a pipe gets the plain summary.
    pub fn detect(json_flag: bool, is_tty: bool) -> Self {
        if json_flag {
            DisplayMode::Json
        } else if is_tty {
            DisplayMode::Tui
        } else {
            DisplayMode::Headless
        }
    }
}
