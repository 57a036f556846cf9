//! Exit code mapping.

use std::process::ExitStatus;

/// Convert a child's exit status into the code the launcher exits with.
///
/// A normal exit keeps its code. On Unix a child killed by a signal maps to
/// `128 + signo`, the shell convention.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
