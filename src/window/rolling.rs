use std::collections::VecDeque;

use chrono::Utc;

use super::types::{Sample, WindowStats};

pub const DEFAULT_WINDOW_CAPACITY: usize = 50;

/// Most recent successful samples, oldest first.
///
/// Indices keep counting across evictions, so they stay strictly increasing
/// even after the front of the window has been dropped.
#[derive(Clone, Debug)]
pub struct RollingWindow {
    samples: VecDeque<Sample>,
    capacity: usize,
    next_index: u64,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        RollingWindow {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            next_index: 1,
        }
    }

    pub fn append(&mut self, latency_ms: f64) -> &Sample {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        let index = self.next_index;
        self.next_index += 1;
        self.samples.push_back(Sample {
            index,
            latency_ms,
            captured_at: Utc::now(),
        });
        &self.samples[self.samples.len() - 1]
    }

    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().cloned().collect()
    }

    pub fn stats(&self) -> Option<WindowStats> {
        WindowStats::from_samples(&self.samples)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn latest_index(&self) -> Option<u64> {
        self.last().map(|sample| sample.index)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RollingWindow {
    fn default() -> Self {
        RollingWindow::new(DEFAULT_WINDOW_CAPACITY)
    }
}
