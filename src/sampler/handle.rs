use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::scheduler::{SampleScheduler, Visualizer};
use super::types::{SamplerTelemetry, WindowFrame};
use crate::probe::LatencyProbe;

pub(super) struct SharedFrame {
    latest: RwLock<Option<WindowFrame>>,
    ready: AtomicBool,
    notify_ready: Notify,
}

impl SharedFrame {
    fn new() -> Self {
        SharedFrame {
            latest: RwLock::new(None),
            ready: AtomicBool::new(false),
            notify_ready: Notify::new(),
        }
    }

    pub(super) async fn publish(&self, frame: WindowFrame) {
        let mut guard = self.latest.write().await;
        *guard = Some(frame);
        drop(guard);
        if !self.ready.swap(true, Ordering::SeqCst) {
            self.notify_ready.notify_waiters();
        }
    }
}

/// A scheduler running on the tokio runtime. Dropping the handle stops it.
pub struct SamplerHandle {
    shared: Arc<SharedFrame>,
    cancel: CancellationToken,
    task: Option<JoinHandle<SamplerTelemetry>>,
}

impl SamplerHandle {
    /// Must be called from within a tokio runtime.
    pub fn spawn<P, V>(scheduler: SampleScheduler<P, V>) -> Self
    where
        P: LatencyProbe + 'static,
        V: Visualizer + 'static,
    {
        let shared = Arc::new(SharedFrame::new());
        let cancel = CancellationToken::new();

        let task_shared = Arc::clone(&shared);
        let task_cancel = cancel.clone();
        let task = tokio::spawn(async move {
            scheduler
                .run_publishing(task_cancel, Some(task_shared.as_ref()))
                .await
        });

        SamplerHandle {
            shared,
            cancel,
            task: Some(task),
        }
    }

    pub async fn latest_frame(&self) -> Option<WindowFrame> {
        self.shared.latest.read().await.clone()
    }

    pub async fn wait_until_ready(&self) {
        let notified = self.shared.notify_ready.notified();
        if self.shared.ready.load(Ordering::SeqCst) {
            return;
        }
        notified.await;
    }

    /// Stops the loop and returns its final telemetry.
    pub async fn shutdown(mut self) -> Option<SamplerTelemetry> {
        self.cancel.cancel();
        let task = self.task.take()?;
        task.await.ok()
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
