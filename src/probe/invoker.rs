use std::process::Stdio;

use tokio::process::Command;

use super::platform::ProbeStrategy;
use super::types::ProbeError;

/// Runs the external probe command once per call.
#[derive(Clone, Debug)]
pub struct ProbeInvoker {
    program: String,
    host: String,
    args: &'static [&'static str],
}

impl ProbeInvoker {
    pub fn new(program: &str, host: &str, strategy: &dyn ProbeStrategy) -> Self {
        ProbeInvoker {
            program: program.to_string(),
            host: host.to_string(),
            args: strategy.args(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn command_line(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|arg| arg.to_string()))
            .chain(std::iter::once(self.host.clone()))
            .collect()
    }

    /// Returns the command's stdout. The exit status is ignored: Windows
    /// `ping` exits 0 on some failures, so the parser decides.
    ///
    /// Dropping the returned future kills and reaps the child.
    pub async fn invoke(&self) -> Result<String, ProbeError> {
        let output = Command::new(&self.program)
            .args(self.args)
            .arg(&self.host)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        String::from_utf8(output.stdout).map_err(ProbeError::Decode)
    }
}
