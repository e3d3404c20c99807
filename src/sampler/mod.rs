mod handle;
mod scheduler;
mod types;

pub use handle::SamplerHandle;
pub use scheduler::{SampleScheduler, Visualizer, DEFAULT_TICK_INTERVAL};
pub use types::{SamplerTelemetry, TickOutcome, WindowFrame};
