use std::io;
use std::time::Duration;

use chrono::Utc;
use log::{debug, error, info, warn};
use tokio::select;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::handle::SharedFrame;
use super::types::{SamplerTelemetry, TickOutcome, WindowFrame};
use crate::config::PingConfig;
use crate::probe::{LatencyProbe, ProbeOutcome};
use crate::window::RollingWindow;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);
const DEFAULT_FAILURE_WARN_AFTER: u32 = 5;
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Receives a frame after every tick. Owns whatever render state it needs.
pub trait Visualizer: Send {
    fn render(&mut self, frame: &WindowFrame) -> io::Result<()>;
}

/// Drives probe → parse → append → render, one tick at a time.
pub struct SampleScheduler<P, V> {
    probe: P,
    visualizer: V,
    window: RollingWindow,
    tick_interval: Duration,
    failure_warn_after: u32,
    tick: u64,
    telemetry: SamplerTelemetry,
}

impl<P, V> SampleScheduler<P, V>
where
    P: LatencyProbe,
    V: Visualizer,
{
    /// A zero `tick_interval` is raised to 1 ms; tokio intervals need a period.
    pub fn new(probe: P, visualizer: V, window_capacity: usize, tick_interval: Duration) -> Self {
        SampleScheduler {
            probe,
            visualizer,
            window: RollingWindow::new(window_capacity),
            tick_interval: tick_interval.max(MIN_TICK_INTERVAL),
            failure_warn_after: DEFAULT_FAILURE_WARN_AFTER,
            tick: 0,
            telemetry: SamplerTelemetry::default(),
        }
    }

    pub fn from_config(probe: P, visualizer: V, config: &PingConfig) -> Self {
        SampleScheduler::new(
            probe,
            visualizer,
            config.window_capacity,
            config.tick_interval(),
        )
        .with_failure_warn_after(config.spawn_failure_warn_after)
    }

    /// 0 disables the streak report.
    pub fn with_failure_warn_after(mut self, failures: u32) -> Self {
        self.failure_warn_after = failures;
        self
    }

    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    pub fn telemetry(&self) -> &SamplerTelemetry {
        &self.telemetry
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Runs one full tick. Every per-tick failure is absorbed here.
    pub async fn tick(&mut self) -> WindowFrame {
        self.tick += 1;

        let outcome = match self.probe.probe().await {
            ProbeOutcome::Latency(latency_ms) => {
                let index = self.window.append(latency_ms).index;
                self.telemetry.record_sample();
                TickOutcome::Sampled { index, latency_ms }
            }
            ProbeOutcome::NoData => {
                debug!("tick {}: no data", self.tick);
                self.telemetry.record_no_data();
                TickOutcome::NoData
            }
            ProbeOutcome::Failed(err) => {
                debug!("tick {}: probe failed: {}", self.tick, err);
                if self.telemetry.record_failure(self.failure_warn_after) {
                    error!(
                        "{} consecutive probe failures, last: {}",
                        self.telemetry.consecutive_failures, err
                    );
                }
                TickOutcome::ProbeFailed {
                    reason: err.to_string(),
                }
            }
        };

        let frame = WindowFrame {
            tick: self.tick,
            captured_at: Utc::now(),
            outcome,
            samples: self.window.snapshot(),
            stats: self.window.stats(),
        };

        if let Err(err) = self.visualizer.render(&frame) {
            warn!("visualizer error on tick {}: {}", self.tick, err);
        }

        frame
    }

    /// Ticks until `cancel` fires. A probe slower than the interval delays
    /// the following ticks; none are skipped and none overlap.
    pub async fn run(self, cancel: CancellationToken) -> SamplerTelemetry {
        self.run_publishing(cancel, None).await
    }

    pub(super) async fn run_publishing(
        mut self,
        cancel: CancellationToken,
        shared: Option<&SharedFrame>,
    ) -> SamplerTelemetry {
        let mut ticker = interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            // Dropping the tick future here kills an in-flight probe.
            let frame = select! {
                biased;
                _ = cancel.cancelled() => break,
                frame = self.tick() => frame,
            };

            if let Some(shared) = shared {
                shared.publish(frame).await;
            }
        }

        info!(
            "sampler stopped after {} ticks ({} samples, {} no data, {} failures)",
            self.telemetry.ticks,
            self.telemetry.samples,
            self.telemetry.no_data,
            self.telemetry.probe_failures
        );
        self.telemetry
    }
}
