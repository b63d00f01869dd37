//! Rolling sample history.
//!
//! The dashboard charts the most recent samples only, so the history is a
//! fixed-size sliding window: insertion order, oldest evicted first.

use std::collections::VecDeque;

use crate::sample::NetworkSample;

/// Maximum number of samples kept in the window.
pub const HISTORY_CAPACITY: usize = 30;

/// Sliding window over the most recent [`NetworkSample`]s.
#[derive(Debug, Clone, Default)]
pub struct SampleHistory {
    samples: VecDeque<NetworkSample>,
}

impl SampleHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self { samples: VecDeque::with_capacity(HISTORY_CAPACITY) }
    }

    /// Append a sample, evicting the oldest once the window is full.
    pub fn push(&mut self, sample: NetworkSample) {
        if self.samples.len() == HISTORY_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// The most recently appended sample, if any.
    pub fn latest(&self) -> Option<&NetworkSample> {
        self.samples.back()
    }

    /// Iterate samples oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &NetworkSample> {
        self.samples.iter()
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no sample has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Extract a chart series: (tick, value) points oldest-first.
    pub fn series<F>(&self, mut value: F) -> Vec<(f64, f64)>
    where
        F: FnMut(&NetworkSample) -> f64,
    {
        self.samples
            .iter()
            .map(|sample| (sample.time as f64, value(sample)))
            .collect()
    }
}
