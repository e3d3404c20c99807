use serde::{Deserialize, Serialize};

use super::parser::{extract_latency, LINUX_FORMAT, WINDOWS_FORMAT};
use super::types::ProbeError;

/// Per-OS knowledge of how to call `ping` and read its answer.
pub trait ProbeStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn args(&self) -> &'static [&'static str];
    fn parse(&self, raw: &str) -> Option<f64>;
}

pub struct WindowsProbe;

impl ProbeStrategy for WindowsProbe {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn args(&self) -> &'static [&'static str] {
        &["-n", "1"]
    }

    fn parse(&self, raw: &str) -> Option<f64> {
        extract_latency(raw, &WINDOWS_FORMAT)
    }
}

pub struct LinuxProbe;

impl ProbeStrategy for LinuxProbe {
    fn name(&self) -> &'static str {
        "linux"
    }

    // -4: iputils may otherwise resolve AAAA first
    fn args(&self) -> &'static [&'static str] {
        &["-4", "-c", "1"]
    }

    fn parse(&self, raw: &str) -> Option<f64> {
        extract_latency(raw, &LINUX_FORMAT)
    }
}

static WINDOWS: WindowsProbe = WindowsProbe;
static LINUX: LinuxProbe = LinuxProbe;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Windows,
    Linux,
}

impl Platform {
    pub fn detect() -> Result<Self, ProbeError> {
        Platform::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Result<Self, ProbeError> {
        match os.to_ascii_lowercase().as_str() {
            "windows" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            other => Err(ProbeError::Unsupported {
                os: other.to_string(),
            }),
        }
    }

    pub fn strategy(self) -> &'static dyn ProbeStrategy {
        match self {
            Platform::Windows => &WINDOWS,
            Platform::Linux => &LINUX,
        }
    }
}
