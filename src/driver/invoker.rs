//! Runner invocation
//!
//! The only blocking boundary in the harness: run the external program
//! with a fixture path and wait for it to terminate.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::process::Command as TokioCommand;

use crate::common::{Error, Result};

/// How a runner process terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Exited normally with this code
    Code(i32),
    /// Killed by this signal (Unix only)
    Signal(i32),
    /// Terminated without a code or signal the platform could report
    Unknown,
}

impl ExitOutcome {
    /// Clean exit, code 0
    pub fn success(&self) -> bool {
        matches!(self, ExitOutcome::Code(0))
    }
}

impl From<ExitStatus> for ExitOutcome {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ExitOutcome::Code(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ExitOutcome::Signal(signal);
            }
        }

        ExitOutcome::Unknown
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitOutcome::Code(code) => write!(f, "exit code {}", code),
            ExitOutcome::Signal(signal) => write!(f, "killed by signal {}", signal),
            ExitOutcome::Unknown => write!(f, "abnormal termination"),
        }
    }
}

/// Runs the external program against one fixture
///
/// Implementations must not retry or enforce timeouts.
#[async_trait]
pub trait RunnerInvoker: Send + Sync {
    /// Run with `fixture` as the sole argument and wait for termination
    ///
    /// Returns [`Error::RunnerLaunch`] if the process could not be started.
    async fn invoke(&self, fixture: &Path) -> Result<ExitOutcome>;
}

/// Spawns the runner as a child process
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: PathBuf,
    envs: Vec<(OsString, OsString)>,
    inherit_output: bool,
}

impl ProcessRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            envs: Vec::new(),
            inherit_output: true,
        }
    }

    /// Set an environment variable for every runner invocation
    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.envs
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    /// Pass the runner's stdout/stderr through (default) or discard them
    pub fn inherit_output(mut self, inherit: bool) -> Self {
        self.inherit_output = inherit;
        self
    }

    /// The executable launched for each fixture
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn output(&self) -> Stdio {
        if self.inherit_output {
            Stdio::inherit()
        } else {
            Stdio::null()
        }
    }
}

#[async_trait]
impl RunnerInvoker for ProcessRunner {
    async fn invoke(&self, fixture: &Path) -> Result<ExitOutcome> {
        tracing::debug!(
            program = %self.program.display(),
            fixture = %fixture.display(),
            "Launching runner"
        );

        let status = TokioCommand::new(&self.program)
            .arg(fixture)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(self.output())
            .stderr(self.output())
            .status()
            .await
            .map_err(|source| Error::RunnerLaunch {
                program: self.program.clone(),
                source,
            })?;

        Ok(status.into())
    }
}
