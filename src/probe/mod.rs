mod invoker;
mod parser;
mod platform;
mod types;

use std::future::Future;

use log::debug;

pub use invoker::ProbeInvoker;
pub use parser::parse_response;
pub use platform::{LinuxProbe, Platform, ProbeStrategy, WindowsProbe};
pub use types::{ProbeError, ProbeOutcome};

/// One latency measurement attempt per call.
///
/// The scheduler awaits each call to completion before the next tick, so
/// implementations never see overlapping invocations.
pub trait LatencyProbe: Send {
    fn probe(&mut self) -> impl Future<Output = ProbeOutcome> + Send;
}

/// Probe backed by the system `ping` utility.
pub struct PingProbe {
    platform: Platform,
    invoker: ProbeInvoker,
}

impl PingProbe {
    pub fn new(platform: Platform, host: &str, program: &str) -> Self {
        PingProbe {
            platform,
            invoker: ProbeInvoker::new(program, host, platform.strategy()),
        }
    }

    /// Selects the strategy for the OS this binary was built for.
    pub fn for_current_os(host: &str, program: &str) -> Result<Self, ProbeError> {
        let platform = Platform::detect()?;
        Ok(PingProbe::new(platform, host, program))
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn invoker(&self) -> &ProbeInvoker {
        &self.invoker
    }
}

impl LatencyProbe for PingProbe {
    async fn probe(&mut self) -> ProbeOutcome {
        let raw = match self.invoker.invoke().await {
            Ok(raw) => raw,
            Err(err) => return ProbeOutcome::Failed(err),
        };

        match parse_response(self.platform, &raw) {
            Some(latency) => ProbeOutcome::Latency(latency),
            None => {
                debug!(
                    "no latency in {} bytes of {} output",
                    raw.len(),
                    self.invoker.program()
                );
                ProbeOutcome::NoData
            }
        }
    }
}
