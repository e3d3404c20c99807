use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub index: u64,
    pub latency_ms: f64,
    pub captured_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub count: usize,
}

impl WindowStats {
    /// `None` for an empty slice; there is no average of nothing.
    pub fn from_samples<'a, I>(samples: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Sample>,
    {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        let mut sum = 0.0;
        let mut count = 0usize;
        for sample in samples {
            min = min.min(sample.latency_ms);
            max = max.max(sample.latency_ms);
            sum += sample.latency_ms;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some(WindowStats {
            min,
            max,
            average: sum / count as f64,
            count,
        })
    }
}
