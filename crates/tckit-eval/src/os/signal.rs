//! Signal identification

/// Signal delivered when a process exceeds its CPU-time limit
#[cfg(unix)]
pub const CPU_LIMIT_SIGNAL: i32 = nix::sys::signal::Signal::SIGXCPU as i32;

#[cfg(not(unix))]
pub const CPU_LIMIT_SIGNAL: i32 = 24;

/// Human-readable description of a signal, e.g. "Segmentation fault"
#[cfg(unix)]
pub fn describe_signal(signal: i32) -> String {
    // SAFETY: strsignal returns a pointer to a NUL-terminated string that stays
    // valid until the next strsignal call on this thread; it is copied before
    // returning.
    let description = unsafe {
        let ptr = libc::strsignal(signal);
        if ptr.is_null() {
            None
        } else {
            Some(std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned())
        }
    };

    description.unwrap_or_else(|| match nix::sys::signal::Signal::try_from(signal) {
        Ok(sig) => sig.as_str().to_string(),
        Err(_) => format!("Signal {}", signal),
    })
}

#[cfg(not(unix))]
pub fn describe_signal(signal: i32) -> String {
    format!("Signal {}", signal)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_limit_signal_is_sigxcpu() {
        assert_eq!(CPU_LIMIT_SIGNAL, libc::SIGXCPU);
    }

    #[test]
    fn test_describe_signal() {
        assert_eq!(describe_signal(libc::SIGSEGV), "Segmentation fault");
        assert!(!describe_signal(libc::SIGKILL).is_empty());
    }
}
