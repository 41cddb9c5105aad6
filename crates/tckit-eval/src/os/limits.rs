//! Resource limits applied to spawned processes

use serde::{Deserialize, Serialize};
use tokio::process::Command;

/// CPU-time and memory ceilings; `None` means unlimited
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    pub cpu_seconds: Option<u64>,
    pub memory_bytes: Option<u64>,
}

impl ResourceLimits {
    pub fn is_unlimited(&self) -> bool {
        self.cpu_seconds.is_none() && self.memory_bytes.is_none()
    }

    /// Install the limits in the child between fork and exec
    #[cfg(unix)]
    pub(crate) fn apply(&self, cmd: &mut Command) {
        if self.is_unlimited() {
            return;
        }

        let cpu = self.cpu_seconds;
        let memory = self.memory_bytes;

        // SAFETY: pre_exec runs between fork() and exec() in the child process.
        // The closure only calls setrlimit, which is async-signal-safe, and
        // captures Copy values only.
        unsafe {
            cmd.pre_exec(move || {
                if let Some(mem) = memory {
                    set_limit(libc::RLIMIT_AS, mem, mem)?;
                }

                // The hard limit sits one second above the soft limit so the
                // child receives SIGXCPU rather than SIGKILL.
                if let Some(secs) = cpu {
                    set_limit(libc::RLIMIT_CPU, secs, secs.saturating_add(1))?;
                }

                Ok(())
            });
        }
    }

    #[cfg(not(unix))]
    pub(crate) fn apply(&self, _cmd: &mut Command) {}
}

#[cfg(all(unix, target_os = "linux", target_env = "gnu"))]
type Resource = libc::__rlimit_resource_t;

#[cfg(all(unix, not(all(target_os = "linux", target_env = "gnu"))))]
type Resource = libc::c_int;

#[cfg(unix)]
fn set_limit(resource: Resource, soft: u64, hard: u64) -> std::io::Result<()> {
    let limit = libc::rlimit {
        rlim_cur: soft as libc::rlim_t,
        rlim_max: hard as libc::rlim_t,
    };
    // SAFETY: `limit` is a valid, initialized rlimit for the duration of the call.
    if unsafe { libc::setrlimit(resource, &limit) } != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unlimited() {
        assert!(ResourceLimits::default().is_unlimited());
        assert!(
            !ResourceLimits {
                cpu_seconds: Some(1),
                memory_bytes: None,
            }
            .is_unlimited()
        );
    }
}
