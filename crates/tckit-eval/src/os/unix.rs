//! Unix implementation of the operating-system collaborator

use async_trait::async_trait;
use parking_lot::Mutex;
use std::fs::File;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, warn};

use super::{ExecutionRequest, ExecutionResult, ExitOutcome, OperatingSystem, OsError, ResourceLimits};

/// Runs commands through `sh -c` with `setrlimit` ceilings.
///
/// A simple command is exec'd by the shell, so the submission itself is the
/// waited-on process and its terminating signal is reported as is.
#[derive(Debug, Default)]
pub struct UnixOperatingSystem {
    limits: Mutex<ResourceLimits>,
}

impl UnixOperatingSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits that the next execution will run under
    pub fn current_limits(&self) -> ResourceLimits {
        *self.limits.lock()
    }
}

/// Read the termination of the spawned process from its wait status.
///
/// Only a signal reported by the wait status counts as a signal. Exit codes
/// above 128 stay exit codes, whatever a shell would have meant by them.
pub fn exit_outcome(status: ExitStatus) -> Option<ExitOutcome> {
    match (status.signal(), status.code()) {
        (Some(signal), _) => Some(ExitOutcome::Signaled(signal)),
        (None, Some(code)) => Some(ExitOutcome::Exited(code)),
        (None, None) => None,
    }
}

fn open_input(path: &Path) -> Result<Stdio, OsError> {
    File::open(path)
        .map(Stdio::from)
        .map_err(|source| OsError::Redirect {
            path: path.display().to_string(),
            source,
        })
}

fn create_output(path: &Path) -> Result<Stdio, OsError> {
    File::create(path)
        .map(Stdio::from)
        .map_err(|source| OsError::Redirect {
            path: path.display().to_string(),
            source,
        })
}

#[async_trait]
impl OperatingSystem for UnixOperatingSystem {
    fn limit_execution_time(&self, seconds: u64) {
        self.limits.lock().cpu_seconds = (seconds > 0).then_some(seconds);
    }

    fn limit_execution_memory(&self, bytes: u64) {
        self.limits.lock().memory_bytes = (bytes > 0).then_some(bytes);
    }

    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, OsError> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(&request.command);

        cmd.stdin(match &request.stdin {
            Some(path) => open_input(path)?,
            None => Stdio::null(),
        });
        cmd.stdout(match &request.stdout {
            Some(path) => create_output(path)?,
            None => Stdio::null(),
        });
        cmd.stderr(match &request.stderr {
            Some(path) => create_output(path)?,
            None => Stdio::null(),
        });

        let limits = self.current_limits();
        limits.apply(&mut cmd);

        debug!(id = %request.id, command = %request.command, ?limits, "executing");
        let status = cmd.status().await.map_err(|source| OsError::Spawn {
            command: request.command.clone(),
            source,
        })?;

        let outcome = exit_outcome(status).ok_or(OsError::UnknownStatus)?;
        debug!(id = %request.id, ?outcome, "execution finished");

        let stderr = match &request.stderr {
            Some(path) => match tokio::fs::read(path).await {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    warn!("Failed to read captured stderr {:?}: {}", path, e);
                    String::new()
                }
            },
            None => String::new(),
        };

        Ok(ExecutionResult { outcome, stderr })
    }

    async fn remove_file(&self, path: &Path) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => debug!("Removed {:?}", path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {:?}: {}", path, e),
        }
    }
}
