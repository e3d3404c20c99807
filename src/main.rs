use std::io;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info, LevelFilter};
use sysinfo::System;
use tokio_util::sync::CancellationToken;

use ping_tester_lib::{
    initialize_logger, ConsoleVisualizer, JsonLinesVisualizer, PingConfig, PingProbe,
    SampleScheduler, SamplerTelemetry,
};

#[derive(Debug, Parser)]
#[command(
    name = "ping-tester",
    version,
    about = "Continuously ping a host and show a rolling latency window"
)]
struct Cli {
    /// Host to ping (default: www.google.com)
    #[arg(long)]
    host: Option<String>,
    /// Number of successful samples kept in the window
    #[arg(long)]
    capacity: Option<usize>,
    /// Milliseconds between ticks
    #[arg(long)]
    interval_ms: Option<u64>,
    /// Ping executable to run
    #[arg(long)]
    program: Option<String>,
    /// JSON config file (falls back to $PING_TESTER_CONFIG, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print one JSON frame per tick instead of a status line
    #[arg(long)]
    json: bool,
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, config: &mut PingConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(capacity) = self.capacity {
            config.window_capacity = capacity;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.tick_interval_ms = interval_ms;
        }
        if let Some(program) = &self.program {
            config.program = program.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    initialize_logger(if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let mut config = PingConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    let probe = match PingProbe::for_current_os(&config.host, &config.program) {
        Ok(probe) => probe,
        Err(err) => {
            error!("{}", err);
            return Err(err.into());
        }
    };

    info!(
        "pinging {} every {} ms, window of {} ({:?}, {})",
        config.host,
        config.tick_interval_ms,
        config.window_capacity,
        probe.platform(),
        System::long_os_version().unwrap_or_else(|| "unknown os".to_string())
    );

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.cancel();
        }
    });

    let telemetry: SamplerTelemetry = if cli.json {
        let visualizer = JsonLinesVisualizer::new(io::stdout());
        SampleScheduler::from_config(probe, visualizer, &config)
            .run(cancel)
            .await
    } else {
        let visualizer = ConsoleVisualizer::new(io::stdout());
        SampleScheduler::from_config(probe, visualizer, &config)
            .run(cancel)
            .await
    };

    info!(
        "{} of {} probes answered",
        telemetry.samples, telemetry.ticks
    );
    Ok(())
}
