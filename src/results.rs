//! Result data structures for simulation output.
//!
//! This module provides the data structures for a finished (or paused)
//! simulation run: the configuration that produced it, the rolling sample
//! window, per-window averages, and the final call quality. All
//! structures implement Serialize for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::SimulationConfig;
use crate::driver::SimulationDriver;
use crate::history::SampleHistory;
use crate::sample::NetworkSample;
use crate::scoring::QualityResult;
use crate::stats::{mean_f64, median_f64};

/// Complete snapshot of a simulation run.
///
/// Built from the driver after the last tick of interest; serializes to
/// the JSON document emitted by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Timestamp when the report was produced
    pub timestamp: DateTime<Utc>,
    /// Number of ticks completed
    pub ticks: u64,
    /// Configuration active at report time
    pub config: SimulationConfig,
    /// Quality of the newest sample
    pub quality: QualityResult,
    /// Averages over the rolling window
    pub window: WindowSummary,
    /// The rolling window itself, oldest-first
    pub samples: Vec<NetworkSample>,
}

impl SimulationReport {
    /// Build a report from the driver's current state.
    pub fn from_driver(driver: &SimulationDriver) -> Self {
        Self {
            timestamp: Utc::now(),
            ticks: driver.current_tick(),
            config: driver.config().clone(),
            quality: driver.quality().clone(),
            window: WindowSummary::from_history(driver.history()),
            samples: driver.history().iter().cloned().collect(),
        }
    }
}

/// Aggregates over the rolling sample window.
///
/// All fields are None when the window is empty (before the first tick or
/// right after a reset).
#[derive(Debug, Clone, Serialize)]
pub struct WindowSummary {
    /// Mean network load in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_load_pct: Option<f64>,
    /// Mean packet loss in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_loss_pct: Option<f64>,
    /// Mean jitter in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_jitter_ms: Option<f64>,
    /// Mean latency in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_latency_ms: Option<f64>,
    /// Median latency in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_latency_ms: Option<f64>,
}

impl WindowSummary {
    /// Compute window aggregates from the sample history.
    pub fn from_history(history: &SampleHistory) -> Self {
        let loads: Vec<f64> =
            history.iter().map(|s| s.network_load_pct as f64).collect();
        let losses: Vec<f64> = history.iter().map(|s| s.packet_loss_pct).collect();
        let jitters: Vec<f64> = history.iter().map(|s| s.jitter_ms).collect();
        let latencies: Vec<f64> =
            history.iter().map(|s| s.latency_ms as f64).collect();

        Self {
            avg_load_pct: mean_f64(&loads),
            avg_loss_pct: mean_f64(&losses),
            avg_jitter_ms: mean_f64(&jitters),
            avg_latency_ms: mean_f64(&latencies),
            median_latency_ms: median_f64(&latencies),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::CallStatus;

    fn driver_after(ticks: usize) -> SimulationDriver {
        let mut driver =
            SimulationDriver::new(SimulationConfig::default(), Some(11));
        driver.start();
        for _ in 0..ticks {
            driver.tick();
        }
        driver
    }

    #[test]
    fn test_empty_window_summary_is_all_none() {
        let driver = driver_after(0);
        let summary = WindowSummary::from_history(driver.history());
        assert!(summary.avg_load_pct.is_none());
        assert!(summary.avg_loss_pct.is_none());
        assert!(summary.avg_jitter_ms.is_none());
        assert!(summary.avg_latency_ms.is_none());
        assert!(summary.median_latency_ms.is_none());
    }

    #[test]
    fn test_report_reflects_driver_state() {
        let driver = driver_after(12);
        let report = SimulationReport::from_driver(&driver);

        assert_eq!(report.ticks, 12);
        assert_eq!(report.samples.len(), 12);
        assert_eq!(report.samples[0].time, 1);
        assert_eq!(report.samples[11].time, 12);
        assert_eq!(&report.quality, driver.quality());
        assert!(report.window.avg_latency_ms.is_some());
    }

    #[test]
    fn test_report_before_first_tick_carries_default_quality() {
        let report = SimulationReport::from_driver(&driver_after(0));
        assert_eq!(report.quality.mos, 4.5);
        assert_eq!(report.quality.r_factor, 85);
        assert_eq!(report.quality.status, CallStatus::Excellent);
        assert!(report.samples.is_empty());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = SimulationReport::from_driver(&driver_after(3));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["ticks"], 3);
        assert_eq!(json["samples"].as_array().unwrap().len(), 3);
        assert!(json["quality"]["mos"].is_number());
        assert!(json["quality"]["status"].is_string());
        assert!(json["window"]["avg_latency_ms"].is_number());
    }

    #[test]
    fn test_empty_window_fields_are_omitted_from_json() {
        let report = SimulationReport::from_driver(&driver_after(0));
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["window"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_window_averages_match_stats_helpers() {
        let driver = driver_after(5);
        let summary = WindowSummary::from_history(driver.history());

        let latencies: Vec<f64> =
            driver.history().iter().map(|s| s.latency_ms as f64).collect();
        assert_eq!(summary.avg_latency_ms, mean_f64(&latencies));
        assert_eq!(summary.median_latency_ms, median_f64(&latencies));
    }
}
