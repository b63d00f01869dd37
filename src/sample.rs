//! Synthetic network sample generation.
//!
//! One [`NetworkSample`] is produced per simulation tick from the current
//! configuration plus a caller-supplied randomness source. A deterministic
//! sine oscillation stands in for the daily load pattern; small uniform
//! noise terms keep the chart lines lively. Seeding the RNG makes a run
//! fully reproducible.

use rand::Rng;
use serde::Serialize;

use crate::config::SimulationConfig;

/// Fixed per-call voice bandwidth in kbps (G.711 codec assumption).
///
/// The simulated call always uses a G.711 stream, so this is a constant
/// rather than a configuration field.
pub const VOICE_BANDWIDTH_KBPS: u32 = 64;

/// One observation of the simulated network, produced per tick.
///
/// Samples are immutable once generated; the history window stores them
/// as-is and the scorer reads loss/latency/jitter from the newest one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSample {
    /// Tick index, monotonically increasing from 1
    pub time: u64,
    /// Configured link bandwidth in kbps, copied from the config snapshot
    pub bandwidth_kbps: u32,
    /// Simulated overall network load in percent
    pub network_load_pct: u32,
    /// Simulated packet loss in percent, rounded to 2 decimals
    pub packet_loss_pct: f64,
    /// Simulated jitter in milliseconds, rounded to 1 decimal
    pub jitter_ms: f64,
    /// Simulated one-way latency in milliseconds
    pub latency_ms: u32,
    /// Bandwidth consumed by the voice stream in kbps (always G.711)
    pub voice_bandwidth_kbps: u32,
}

/// Multiplier applied to configured loss when QoS prioritizes voice.
const QOS_LOSS_FACTOR: f64 = 0.3;
/// Multiplier applied to configured jitter when QoS prioritizes voice.
const QOS_JITTER_FACTOR: f64 = 0.5;
/// Upper bound of the random latency penalty applied without QoS, in ms.
const NO_QOS_LATENCY_PENALTY_MS: f64 = 10.0;

/// Center of the load oscillation in percent.
const LOAD_BASE_PCT: f64 = 30.0;
/// Amplitude of the load oscillation in percent.
const LOAD_SWING_PCT: f64 = 20.0;
/// Ticks per radian of the load oscillation.
const LOAD_PERIOD_TICKS: f64 = 10.0;

/// Upper bound of the uniform load noise in percent.
const LOAD_NOISE_PCT: f64 = 10.0;
/// Upper bound of the uniform loss noise in percent.
const LOSS_NOISE_PCT: f64 = 0.5;
/// Upper bound of the uniform jitter noise in ms.
const JITTER_NOISE_MS: f64 = 2.0;

/// Generate the network sample for tick `tick`.
///
/// Pure aside from the RNG draws: the same (config, tick, RNG state)
/// always yields the same sample. The config is defensively clamped to
/// its control ranges first, so callers never need to validate it.
///
/// QoS changes three things, matching how voice prioritization behaves
/// on a congested link: loss drops to 30% of the configured value,
/// jitter halves, and the random 0-10 ms queuing penalty on latency
/// disappears.
pub fn generate<R: Rng>(
    config: &SimulationConfig,
    tick: u64,
    rng: &mut R,
) -> NetworkSample {
    let config = config.clamped();

    let base_load =
        LOAD_BASE_PCT + LOAD_SWING_PCT * (tick as f64 / LOAD_PERIOD_TICKS).sin();

    let (actual_loss, actual_jitter, actual_latency) = if config.qos_enabled {
        (
            config.packet_loss_pct * QOS_LOSS_FACTOR,
            config.jitter_ms * QOS_JITTER_FACTOR,
            config.latency_ms,
        )
    } else {
        (
            config.packet_loss_pct,
            config.jitter_ms,
            config.latency_ms + rng.gen_range(0.0..NO_QOS_LATENCY_PENALTY_MS),
        )
    };

    NetworkSample {
        time: tick,
        bandwidth_kbps: config.bandwidth_kbps,
        network_load_pct: (base_load + rng.gen_range(0.0..LOAD_NOISE_PCT)).round()
            as u32,
        packet_loss_pct: round_to(actual_loss + rng.gen_range(0.0..LOSS_NOISE_PCT), 2),
        jitter_ms: round_to(actual_jitter + rng.gen_range(0.0..JITTER_NOISE_MS), 1),
        latency_ms: actual_latency.round() as u32,
        voice_bandwidth_kbps: VOICE_BANDWIDTH_KBPS,
    }
}

/// Round to `decimals` decimal places, half away from zero.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// RNG that always draws the low end of every range, removing noise.
    struct ZeroRng;

    impl rand::RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(
            &mut self,
            dest: &mut [u8],
        ) -> Result<(), rand::Error> {
            dest.fill(0);
            Ok(())
        }
    }

    #[test]
    fn test_sample_copies_config_and_codec_constant() {
        let config = SimulationConfig {
            bandwidth_kbps: 512,
            ..SimulationConfig::default()
        };
        let sample = generate(&config, 1, &mut ZeroRng);

        assert_eq!(sample.time, 1);
        assert_eq!(sample.bandwidth_kbps, 512);
        assert_eq!(sample.voice_bandwidth_kbps, VOICE_BANDWIDTH_KBPS);
    }

    #[test]
    fn test_noiseless_sample_matches_model() {
        let config = SimulationConfig {
            packet_loss_pct: 2.0,
            jitter_ms: 10.0,
            latency_ms: 100.0,
            ..SimulationConfig::default()
        };
        let sample = generate(&config, 0, &mut ZeroRng);

        // sin(0) = 0, so load is exactly the oscillation center.
        assert_eq!(sample.network_load_pct, 30);
        assert_eq!(sample.packet_loss_pct, 2.0);
        assert_eq!(sample.jitter_ms, 10.0);
        // Without QoS the latency penalty draw is 0 under ZeroRng.
        assert_eq!(sample.latency_ms, 100);
    }

    #[test]
    fn test_qos_scales_loss_and_jitter_and_drops_latency_penalty() {
        let config = SimulationConfig {
            packet_loss_pct: 2.0,
            jitter_ms: 10.0,
            latency_ms: 100.0,
            qos_enabled: true,
            ..SimulationConfig::default()
        };
        let sample = generate(&config, 0, &mut ZeroRng);

        assert_eq!(sample.packet_loss_pct, 0.6); // 2.0 * 0.3
        assert_eq!(sample.jitter_ms, 5.0); // 10.0 * 0.5
        assert_eq!(sample.latency_ms, 100);
    }

    #[test]
    fn test_out_of_range_config_is_clamped_at_the_boundary() {
        let config = SimulationConfig {
            bandwidth_kbps: 9999,
            packet_loss_pct: 50.0,
            jitter_ms: -5.0,
            latency_ms: 400.0,
            qos_enabled: false,
        };
        let sample = generate(&config, 1, &mut ZeroRng);

        assert_eq!(sample.bandwidth_kbps, 2000);
        assert_eq!(sample.packet_loss_pct, 10.0);
        assert_eq!(sample.jitter_ms, 0.0);
        assert_eq!(sample.latency_ms, 200);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = SimulationConfig::default();

        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        for tick in 1..=10 {
            assert_eq!(
                generate(&config, tick, &mut a),
                generate(&config, tick, &mut b)
            );
        }
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234_56, 2), 1.23);
        assert_eq!(round_to(1.235, 2), 1.24);
        assert_eq!(round_to(9.95, 1), 10.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: every generated field stays inside the envelope the
        /// model permits, for any in-range config and any RNG seed.
        #[test]
        fn generated_fields_respect_noise_bounds(
            seed in any::<u64>(),
            tick in 0u64..10_000,
            loss in 0.0f64..10.0,
            jitter in 0.0f64..50.0,
            latency in 10.0f64..200.0,
            qos in any::<bool>(),
        ) {
            let config = SimulationConfig {
                bandwidth_kbps: 1000,
                packet_loss_pct: loss,
                jitter_ms: jitter,
                latency_ms: latency,
                qos_enabled: qos,
            };
            let mut rng = StdRng::seed_from_u64(seed);
            let sample = generate(&config, tick, &mut rng);

            // Oscillation [10, 50] plus noise [0, 10), rounded.
            prop_assert!(sample.network_load_pct <= 60);

            let base_loss = if qos { loss * 0.3 } else { loss };
            prop_assert!(sample.packet_loss_pct >= round_to(base_loss, 2) - 0.01);
            prop_assert!(sample.packet_loss_pct <= base_loss + 0.5 + 0.01);

            let base_jitter = if qos { jitter * 0.5 } else { jitter };
            prop_assert!(sample.jitter_ms >= round_to(base_jitter, 1) - 0.1);
            prop_assert!(sample.jitter_ms <= base_jitter + 2.0 + 0.1);

            let max_latency = if qos { latency } else { latency + 10.0 };
            prop_assert!(sample.latency_ms as f64 >= latency.floor());
            prop_assert!((sample.latency_ms as f64) <= max_latency.ceil());
        }

        /// Property: QoS never makes any derived field worse than the
        /// non-QoS draw bounds allow.
        #[test]
        fn qos_upper_bounds_never_exceed_non_qos(
            seed in any::<u64>(),
            tick in 0u64..1_000,
            loss in 0.1f64..10.0,
            jitter in 1.0f64..50.0,
        ) {
            let base = SimulationConfig {
                packet_loss_pct: loss,
                jitter_ms: jitter,
                ..SimulationConfig::default()
            };
            let with_qos = SimulationConfig { qos_enabled: true, ..base.clone() };

            let mut rng = StdRng::seed_from_u64(seed);
            let sample = generate(&with_qos, tick, &mut rng);

            // Worst possible QoS draw stays under the configured values
            // once the noise ceiling is accounted for.
            prop_assert!(sample.packet_loss_pct <= loss * 0.3 + 0.5 + 0.01);
            prop_assert!(sample.jitter_ms <= jitter * 0.5 + 2.0 + 0.1);
        }
    }
}
