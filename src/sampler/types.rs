use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::window::{Sample, WindowStats};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickOutcome {
    Sampled { index: u64, latency_ms: f64 },
    NoData,
    ProbeFailed { reason: String },
}

/// Read-only copy of the window handed to visualizers after each tick.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WindowFrame {
    pub tick: u64,
    pub captured_at: DateTime<Utc>,
    pub outcome: TickOutcome,
    pub samples: Vec<Sample>,
    pub stats: Option<WindowStats>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerTelemetry {
    pub ticks: u64,
    pub samples: u64,
    pub no_data: u64,
    pub probe_failures: u64,
    pub consecutive_failures: u32,
}

impl SamplerTelemetry {
    pub fn record_sample(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
        self.samples = self.samples.saturating_add(1);
        self.consecutive_failures = 0;
    }

    // The probe ran and answered, so a failure streak ends here too.
    pub fn record_no_data(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
        self.no_data = self.no_data.saturating_add(1);
        self.consecutive_failures = 0;
    }

    /// Returns true exactly when the streak reaches `warn_after`.
    pub fn record_failure(&mut self, warn_after: u32) -> bool {
        self.ticks = self.ticks.saturating_add(1);
        self.probe_failures = self.probe_failures.saturating_add(1);
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        warn_after > 0 && self.consecutive_failures == warn_after
    }
}
