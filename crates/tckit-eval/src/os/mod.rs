//! Operating-system collaborator
//!
//! Spawns commands with redirected standard streams under CPU-time and memory
//! ceilings, and reports how they terminated.

mod limits;
mod signal;
#[cfg(unix)]
mod unix;

pub use limits::ResourceLimits;
pub use signal::{CPU_LIMIT_SIGNAL, describe_signal};
#[cfg(unix)]
pub use unix::UnixOperatingSystem;

use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by the operating-system collaborator itself, as opposed to
/// failures of the executed program
#[derive(Debug, Error)]
pub enum OsError {
    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open '{path}': {source}")]
    Redirect {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Process terminated without exit code or signal")]
    UnknownStatus,
}

/// How a process terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ExitOutcome {
    Exited(i32),
    Signaled(i32),
}

impl ExitOutcome {
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExitOutcome::Exited(code) => Some(*code),
            ExitOutcome::Signaled(_) => None,
        }
    }

    pub fn signal(&self) -> Option<i32> {
        match self {
            ExitOutcome::Signaled(signal) => Some(*signal),
            ExitOutcome::Exited(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExitOutcome::Exited(0))
    }
}

/// Result of one execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub outcome: ExitOutcome,
    /// Captured standard error, empty when stderr was not redirected
    pub stderr: String,
}

impl ExecutionResult {
    pub fn new(outcome: ExitOutcome) -> Self {
        Self {
            outcome,
            stderr: String::new(),
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }
}

/// A command to run with its standard streams bound to files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    /// Label used in logs
    pub id: String,
    /// Shell command line
    pub command: String,
    pub stdin: Option<PathBuf>,
    pub stdout: Option<PathBuf>,
    pub stderr: Option<PathBuf>,
}

impl ExecutionRequest {
    pub fn new(id: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            command: command.into(),
            stdin: None,
            stdout: None,
            stderr: None,
        }
    }

    pub fn stdin(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdin = Some(path.into());
        self
    }

    pub fn stdout(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout = Some(path.into());
        self
    }

    pub fn stderr(mut self, path: impl Into<PathBuf>) -> Self {
        self.stderr = Some(path.into());
        self
    }
}

/// Process execution contract used by the grader and the generator.
///
/// Limits are sticky: they apply to every execution until reset with `0`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OperatingSystem: Send + Sync {
    /// Limit CPU time in seconds; `0` removes the limit
    fn limit_execution_time(&self, seconds: u64);

    /// Limit address space in bytes; `0` removes the limit
    fn limit_execution_memory(&self, bytes: u64);

    /// Run a command to completion
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, OsError>;

    /// Remove a file, ignoring errors
    async fn remove_file(&self, path: &Path);
}
