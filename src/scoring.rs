//! Call-quality scoring module.
//!
//! This module converts a network sample's loss, latency, and jitter into
//! an E-model transmission rating (R-factor) and the derived Mean Opinion
//! Score (MOS) with a categorical status label.
//!
//! The model is the usual simplified E-model heuristic: start from an
//! ideal-connection baseline, subtract per-impairment penalties, add a
//! flat bonus when QoS prioritizes the voice stream, then map R to MOS
//! with the standard cubic.

use serde::Serialize;

use crate::sample::round_to;

/// Categorical call-quality labels derived from the MOS.
///
/// Variants are ordered from worst to best for correct derived Ord
/// behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    /// Unusable - most users would abandon the call
    Bad,
    /// Poor - nearly all users dissatisfied
    Poor,
    /// Fair - many users dissatisfied
    Fair,
    /// Good - some users dissatisfied
    Good,
    /// Excellent - very satisfied users
    Excellent,
}

impl CallStatus {
    /// Returns the display label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            CallStatus::Excellent => "Excellent",
            CallStatus::Good => "Good",
            CallStatus::Fair => "Fair",
            CallStatus::Poor => "Poor",
            CallStatus::Bad => "Bad",
        }
    }

    /// Returns true if this status is better than or equal to the other.
    pub fn is_at_least(&self, other: CallStatus) -> bool {
        *self >= other
    }

    /// Map a (rounded) MOS to its status band, highest band first.
    pub fn from_mos(mos: f64) -> Self {
        use status_thresholds::*;

        if mos >= MOS_EXCELLENT {
            CallStatus::Excellent
        } else if mos >= MOS_GOOD {
            CallStatus::Good
        } else if mos >= MOS_FAIR {
            CallStatus::Fair
        } else if mos >= MOS_POOR {
            CallStatus::Poor
        } else {
            CallStatus::Bad
        }
    }
}

/// Scored call quality for one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityResult {
    /// Mean Opinion Score in [1.0, 5.0], rounded to 2 decimals
    pub mos: f64,
    /// E-model transmission rating in [0, 100]
    pub r_factor: u8,
    /// Categorical quality band for the MOS
    pub status: CallStatus,
}

impl Default for QualityResult {
    /// The quality shown before the first tick and after a reset.
    fn default() -> Self {
        Self { mos: 4.5, r_factor: 85, status: CallStatus::Excellent }
    }
}

/// E-model parameters.
///
/// Baseline and penalties follow the simplified E-model used for VoIP
/// planning: delay only hurts beyond the interactivity threshold, loss
/// dominates, jitter contributes a small linear term.
mod e_model {
    /// R-factor of an ideal G.711 connection.
    pub const BASELINE_R: f64 = 93.2;

    /// One-way delay below this threshold carries no penalty (ms).
    pub const DELAY_THRESHOLD_MS: f64 = 150.0;
    /// R-points lost per millisecond of delay above the threshold.
    pub const DELAY_PENALTY_PER_MS: f64 = 0.2;

    /// R-points lost per percent of packet loss.
    pub const LOSS_PENALTY_PER_PCT: f64 = 25.0;

    /// R-points lost per millisecond of jitter.
    pub const JITTER_PENALTY_PER_MS: f64 = 0.1;

    /// Flat R-point bonus when QoS prioritizes the voice stream.
    pub const QOS_BONUS: f64 = 5.0;
}

/// MOS thresholds for the status bands, evaluated highest-first.
mod status_thresholds {
    /// Minimum MOS for Excellent.
    pub const MOS_EXCELLENT: f64 = 4.0;
    /// Minimum MOS for Good.
    pub const MOS_GOOD: f64 = 3.5;
    /// Minimum MOS for Fair.
    pub const MOS_FAIR: f64 = 3.0;
    /// Minimum MOS for Poor.
    pub const MOS_POOR: f64 = 2.0;
}

/// Convert an R-factor in [0, 100] to a MOS in [1, 5].
///
/// This is the standard E-model cubic, applied unconditionally across the
/// whole domain; the low/high R split sometimes seen in references uses
/// the same expression on both branches and so collapses to one formula.
pub fn r_factor_to_mos(r_factor: f64) -> f64 {
    let mos = 1.0
        + 0.035 * r_factor
        + r_factor * (r_factor - 60.0) * (100.0 - r_factor) * 7e-6;

    mos.clamp(1.0, 5.0)
}

/// Score one sample's impairments into a [`QualityResult`].
///
/// # Arguments
/// * `loss_pct` - packet loss in percent
/// * `latency_ms` - one-way latency in milliseconds
/// * `jitter_ms` - jitter in milliseconds
/// * `qos_enabled` - whether the QoS bonus applies
///
/// All inputs are plain numbers; there is no failure path. The R-factor
/// is clamped to [0, 100] before the MOS conversion, and the QoS bonus is
/// applied after all penalties so it can lift a connection back out of
/// the clamp.
pub fn score(
    loss_pct: f64,
    latency_ms: f64,
    jitter_ms: f64,
    qos_enabled: bool,
) -> QualityResult {
    use e_model::*;

    let mut r_factor = BASELINE_R;

    if latency_ms > DELAY_THRESHOLD_MS {
        r_factor -= (latency_ms - DELAY_THRESHOLD_MS) * DELAY_PENALTY_PER_MS;
    }

    r_factor -= loss_pct * LOSS_PENALTY_PER_PCT;
    r_factor -= jitter_ms * JITTER_PENALTY_PER_MS;

    if qos_enabled {
        r_factor += QOS_BONUS;
    }

    r_factor = r_factor.clamp(0.0, 100.0);

    let mos = round_to(r_factor_to_mos(r_factor), 2);

    QualityResult {
        mos,
        r_factor: r_factor.round() as u8,
        status: CallStatus::from_mos(mos),
    }
}
