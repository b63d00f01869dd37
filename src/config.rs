//! Simulation configuration.
//!
//! This module defines the operator-controlled network parameters and the
//! ranges the dashboard exposes for them. The core never validates its
//! inputs beyond a defensive clamp at the generator boundary, so the
//! ranges here are the single source of truth for what "in range" means.

use serde::Serialize;

/// Adjustment ranges and step sizes for the operator-facing controls.
///
/// These mirror the slider ranges of the reference front-end: bandwidth
/// 64-2000 kbps in 64 kbps steps, loss 0-10% in 0.1% steps, jitter
/// 0-50 ms in 1 ms steps, latency 10-200 ms in 5 ms steps.
pub mod ranges {
    /// Minimum configurable bandwidth in kbps.
    pub const BANDWIDTH_MIN_KBPS: u32 = 64;
    /// Maximum configurable bandwidth in kbps.
    pub const BANDWIDTH_MAX_KBPS: u32 = 2000;
    /// Bandwidth adjustment step in kbps.
    pub const BANDWIDTH_STEP_KBPS: u32 = 64;

    /// Minimum configurable packet loss in percent.
    pub const LOSS_MIN_PCT: f64 = 0.0;
    /// Maximum configurable packet loss in percent.
    pub const LOSS_MAX_PCT: f64 = 10.0;
    /// Packet loss adjustment step in percent.
    pub const LOSS_STEP_PCT: f64 = 0.1;

    /// Minimum configurable jitter in milliseconds.
    pub const JITTER_MIN_MS: f64 = 0.0;
    /// Maximum configurable jitter in milliseconds.
    pub const JITTER_MAX_MS: f64 = 50.0;
    /// Jitter adjustment step in milliseconds.
    pub const JITTER_STEP_MS: f64 = 1.0;

    /// Minimum configurable base latency in milliseconds.
    pub const LATENCY_MIN_MS: f64 = 10.0;
    /// Maximum configurable base latency in milliseconds.
    pub const LATENCY_MAX_MS: f64 = 200.0;
    /// Latency adjustment step in milliseconds.
    pub const LATENCY_STEP_MS: f64 = 5.0;
}

/// Network parameters for the simulation.
///
/// Values are set by the operator (CLI flags or dashboard controls) and
/// read as a snapshot on each tick. Changing them never rewrites samples
/// already in the history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationConfig {
    /// Available link bandwidth in kbps
    pub bandwidth_kbps: u32,
    /// Configured packet loss in percent
    pub packet_loss_pct: f64,
    /// Configured jitter in milliseconds
    pub jitter_ms: f64,
    /// Configured base one-way latency in milliseconds
    pub latency_ms: f64,
    /// Whether QoS voice prioritization is enabled
    pub qos_enabled: bool,
}

impl Default for SimulationConfig {
    /// The reference front-end's initial slider positions.
    fn default() -> Self {
        Self {
            bandwidth_kbps: 1000,
            packet_loss_pct: 0.0,
            jitter_ms: 0.0,
            latency_ms: 20.0,
            qos_enabled: false,
        }
    }
}

impl SimulationConfig {
    /// Return a copy with every field clamped to its control range.
    ///
    /// The sample generator applies this at its boundary so an
    /// out-of-range value (e.g. a hand-edited CLI flag) degrades to the
    /// nearest legal setting instead of producing nonsense samples.
    pub fn clamped(&self) -> Self {
        use ranges::*;

        Self {
            bandwidth_kbps: self
                .bandwidth_kbps
                .clamp(BANDWIDTH_MIN_KBPS, BANDWIDTH_MAX_KBPS),
            packet_loss_pct: self.packet_loss_pct.clamp(LOSS_MIN_PCT, LOSS_MAX_PCT),
            jitter_ms: self.jitter_ms.clamp(JITTER_MIN_MS, JITTER_MAX_MS),
            latency_ms: self.latency_ms.clamp(LATENCY_MIN_MS, LATENCY_MAX_MS),
            qos_enabled: self.qos_enabled,
        }
    }

    /// Step bandwidth up or down by one control increment, saturating at
    /// the range bounds.
    pub fn step_bandwidth(&mut self, up: bool) {
        use ranges::*;

        self.bandwidth_kbps = if up {
            (self.bandwidth_kbps + BANDWIDTH_STEP_KBPS).min(BANDWIDTH_MAX_KBPS)
        } else {
            self.bandwidth_kbps
                .saturating_sub(BANDWIDTH_STEP_KBPS)
                .max(BANDWIDTH_MIN_KBPS)
        };
    }

    /// Step packet loss up or down by one control increment.
    pub fn step_loss(&mut self, up: bool) {
        use ranges::*;

        let delta = if up { LOSS_STEP_PCT } else { -LOSS_STEP_PCT };
        // Keep the displayed value on the 0.1 grid despite f64 error.
        self.packet_loss_pct = ((self.packet_loss_pct + delta) * 10.0).round()
            / 10.0;
        self.packet_loss_pct = self.packet_loss_pct.clamp(LOSS_MIN_PCT, LOSS_MAX_PCT);
    }

    /// Step jitter up or down by one control increment.
    pub fn step_jitter(&mut self, up: bool) {
        use ranges::*;

        let delta = if up { JITTER_STEP_MS } else { -JITTER_STEP_MS };
        self.jitter_ms = (self.jitter_ms + delta).clamp(JITTER_MIN_MS, JITTER_MAX_MS);
    }

    /// Step base latency up or down by one control increment.
    pub fn step_latency(&mut self, up: bool) {
        use ranges::*;

        let delta = if up { LATENCY_STEP_MS } else { -LATENCY_STEP_MS };
        self.latency_ms =
            (self.latency_ms + delta).clamp(LATENCY_MIN_MS, LATENCY_MAX_MS);
    }

    /// Toggle QoS voice prioritization.
    pub fn toggle_qos(&mut self) {
        self.qos_enabled = !self.qos_enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_controls() {
        let config = SimulationConfig::default();
        assert_eq!(config.bandwidth_kbps, 1000);
        assert_eq!(config.packet_loss_pct, 0.0);
        assert_eq!(config.jitter_ms, 0.0);
        assert_eq!(config.latency_ms, 20.0);
        assert!(!config.qos_enabled);
    }

    #[test]
    fn test_clamped_restores_out_of_range_values() {
        let config = SimulationConfig {
            bandwidth_kbps: 5000,
            packet_loss_pct: -3.0,
            jitter_ms: 120.0,
            latency_ms: 1.0,
            qos_enabled: true,
        };

        let clamped = config.clamped();
        assert_eq!(clamped.bandwidth_kbps, ranges::BANDWIDTH_MAX_KBPS);
        assert_eq!(clamped.packet_loss_pct, ranges::LOSS_MIN_PCT);
        assert_eq!(clamped.jitter_ms, ranges::JITTER_MAX_MS);
        assert_eq!(clamped.latency_ms, ranges::LATENCY_MIN_MS);
        assert!(clamped.qos_enabled);
    }

    #[test]
    fn test_clamped_is_identity_for_in_range_values() {
        let config = SimulationConfig::default();
        assert_eq!(config.clamped(), config);
    }

    #[test]
    fn test_bandwidth_steps_saturate() {
        let mut config = SimulationConfig::default();
        config.bandwidth_kbps = ranges::BANDWIDTH_MAX_KBPS;
        config.step_bandwidth(true);
        assert_eq!(config.bandwidth_kbps, ranges::BANDWIDTH_MAX_KBPS);

        config.bandwidth_kbps = ranges::BANDWIDTH_MIN_KBPS;
        config.step_bandwidth(false);
        assert_eq!(config.bandwidth_kbps, ranges::BANDWIDTH_MIN_KBPS);

        config.step_bandwidth(true);
        assert_eq!(
            config.bandwidth_kbps,
            ranges::BANDWIDTH_MIN_KBPS + ranges::BANDWIDTH_STEP_KBPS
        );
    }

    #[test]
    fn test_loss_steps_stay_on_tenth_grid() {
        let mut config = SimulationConfig::default();
        for _ in 0..3 {
            config.step_loss(true);
        }
        assert_eq!(config.packet_loss_pct, 0.3);

        config.step_loss(false);
        assert_eq!(config.packet_loss_pct, 0.2);

        for _ in 0..200 {
            config.step_loss(true);
        }
        assert_eq!(config.packet_loss_pct, ranges::LOSS_MAX_PCT);
    }

    #[test]
    fn test_latency_and_jitter_steps_clamp() {
        let mut config = SimulationConfig::default();
        config.step_latency(false);
        config.step_latency(false);
        assert_eq!(config.latency_ms, ranges::LATENCY_MIN_MS);

        config.step_jitter(false);
        assert_eq!(config.jitter_ms, ranges::JITTER_MIN_MS);
        config.step_jitter(true);
        assert_eq!(config.jitter_ms, 1.0);
    }

    #[test]
    fn test_toggle_qos() {
        let mut config = SimulationConfig::default();
        config.toggle_qos();
        assert!(config.qos_enabled);
        config.toggle_qos();
        assert!(!config.qos_enabled);
    }
}
