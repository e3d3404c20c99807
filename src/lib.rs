mod config;
mod logger;
mod probe;
mod render;
mod sampler;
mod window;

pub use config::{default_config_path, ConfigError, PingConfig, CONFIG_ENV_VAR};
pub use logger::initialize_logger;
pub use probe::{
    parse_response, LatencyProbe, LinuxProbe, PingProbe, Platform, ProbeError, ProbeInvoker,
    ProbeOutcome, ProbeStrategy, WindowsProbe,
};
pub use render::{sparkline, title, ConsoleVisualizer, JsonLinesVisualizer};
pub use sampler::{
    SampleScheduler, SamplerHandle, SamplerTelemetry, TickOutcome, Visualizer, WindowFrame,
    DEFAULT_TICK_INTERVAL,
};
pub use window::{RollingWindow, Sample, WindowStats, DEFAULT_WINDOW_CAPACITY};
