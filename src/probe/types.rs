use std::fmt;
use std::io;
use std::string::FromUtf8Error;

#[derive(Debug)]
pub enum ProbeError {
    /// The running OS has no probe strategy. Raised once, at construction.
    Unsupported { os: String },
    Spawn { program: String, source: io::Error },
    Decode(FromUtf8Error),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Unsupported { os } => {
                write!(f, "ping probing is not implemented for '{}'", os)
            }
            ProbeError::Spawn { program, source } => {
                write!(f, "failed to run {}: {}", program, source)
            }
            ProbeError::Decode(err) => write!(f, "probe output is not valid utf-8: {}", err),
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::Unsupported { .. } => None,
            ProbeError::Spawn { source, .. } => Some(source),
            ProbeError::Decode(err) => Some(err),
        }
    }
}

#[derive(Debug)]
pub enum ProbeOutcome {
    Latency(f64),
    /// Loss, unreachable host or output without a usable latency.
    NoData,
    Failed(ProbeError),
}

impl ProbeOutcome {
    pub fn latency(&self) -> Option<f64> {
        match self {
            ProbeOutcome::Latency(ms) => Some(*ms),
            _ => None,
        }
    }
}
