//! Tick driver for the simulation.
//!
//! Thin orchestration around the pure core: a Stopped/Running state
//! machine that, on each tick, generates a sample from the current config
//! snapshot, appends it to the rolling history, scores it, and notifies
//! observers with immutable snapshots of the results.
//!
//! Ticks are strictly sequential. The driver never schedules itself; the
//! front-end (dashboard timer or headless loop) decides when [`tick`]
//! fires, using [`TICK_PERIOD`] when pacing in real time.
//!
//! [`tick`]: SimulationDriver::tick

use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SimulationConfig;
use crate::history::SampleHistory;
use crate::sample::{self, NetworkSample};
use crate::scoring::{self, QualityResult};

/// Interval between ticks when the simulation runs in real time.
pub const TICK_PERIOD: Duration = Duration::from_millis(500);

/// Lifecycle state of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Not ticking; history and quality hold their last values
    Stopped,
    /// Ticking on the front-end's schedule
    Running,
}

/// Observer notified after every completed tick.
///
/// Callbacks receive immutable snapshots and run synchronously inside the
/// tick, so they must be cheap; the next tick cannot fire until every
/// observer returns.
pub trait TickObserver {
    /// Called once per tick with the new sample, its score, and the
    /// updated history window.
    fn on_tick(
        &mut self,
        sample: &NetworkSample,
        quality: &QualityResult,
        history: &SampleHistory,
    );
}

/// Owns the simulation state and advances it one tick at a time.
pub struct SimulationDriver {
    config: SimulationConfig,
    state: DriverState,
    tick: u64,
    history: SampleHistory,
    quality: QualityResult,
    rng: StdRng,
    observers: Vec<Box<dyn TickObserver>>,
}

impl SimulationDriver {
    /// Create a stopped driver with the given configuration.
    ///
    /// A seed makes the whole run reproducible; without one the RNG is
    /// drawn from OS entropy.
    pub fn new(config: SimulationConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            state: DriverState::Stopped,
            tick: 0,
            history: SampleHistory::new(),
            quality: QualityResult::default(),
            rng,
            observers: Vec::new(),
        }
    }

    /// Register an observer for tick notifications.
    pub fn subscribe(&mut self, observer: Box<dyn TickObserver>) {
        self.observers.push(observer);
    }

    /// Begin ticking. No-op when already running.
    pub fn start(&mut self) {
        if self.state == DriverState::Stopped {
            info!("simulation started at tick {}", self.tick);
            self.state = DriverState::Running;
        }
    }

    /// Stop ticking. History and quality keep their last values.
    pub fn stop(&mut self) {
        if self.state == DriverState::Running {
            info!("simulation stopped at tick {}", self.tick);
            self.state = DriverState::Stopped;
        }
    }

    /// Reset to the initial state: stopped, tick 0, empty history, and
    /// the default quality. Valid in either state.
    pub fn reset(&mut self) {
        info!("simulation reset");
        self.state = DriverState::Stopped;
        self.tick = 0;
        self.history.clear();
        self.quality = QualityResult::default();
    }

    /// Advance one tick: generate, append, score, notify.
    ///
    /// Returns false without doing anything while stopped, so a timer can
    /// keep firing regardless of lifecycle state.
    pub fn tick(&mut self) -> bool {
        if self.state != DriverState::Running {
            return false;
        }

        self.tick += 1;
        let sample = sample::generate(&self.config, self.tick, &mut self.rng);
        let quality = scoring::score(
            sample.packet_loss_pct,
            sample.latency_ms as f64,
            sample.jitter_ms,
            self.config.qos_enabled,
        );

        debug!(
            "tick {}: load {}% loss {}% jitter {}ms latency {}ms -> R {} MOS {} ({})",
            self.tick,
            sample.network_load_pct,
            sample.packet_loss_pct,
            sample.jitter_ms,
            sample.latency_ms,
            quality.r_factor,
            quality.mos,
            quality.status.label(),
        );

        self.history.push(sample.clone());
        self.quality = quality;

        for observer in &mut self.observers {
            observer.on_tick(&sample, &self.quality, &self.history);
        }

        true
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// True while the driver accepts ticks.
    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Number of ticks completed since the last reset.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// The rolling sample window.
    pub fn history(&self) -> &SampleHistory {
        &self.history
    }

    /// Quality of the newest sample, or the default before the first tick.
    pub fn quality(&self) -> &QualityResult {
        &self.quality
    }

    /// The active configuration snapshot.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Mutable access for reconfiguration.
    ///
    /// Changes take effect on the next tick and never alter samples
    /// already in the history.
    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }
}
