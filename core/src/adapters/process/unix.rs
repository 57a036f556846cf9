//! Unix signal delivery via `kill(2)`.

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tracing::debug;

use crate::domain::ShutdownSignal;
use crate::error::{Error, Result};

fn to_nix(signal: ShutdownSignal) -> Signal {
    match signal {
        ShutdownSignal::Interrupt => Signal::SIGINT,
        ShutdownSignal::Terminate => Signal::SIGTERM,
    }
}

pub(super) fn send_signal(pid: u32, signal: ShutdownSignal) -> Result<bool> {
    let raw = i32::try_from(pid)
        .map_err(|_| Error::CommandFailed(format!("PID {} out of range", pid)))?;
    let sig = to_nix(signal);

    debug!(pid = pid, signal = sig.as_str(), "Sending signal to child");

    match kill(Pid::from_raw(raw), sig) {
        Ok(()) => Ok(true),
        Err(Errno::ESRCH) => {
            debug!(pid = pid, "Child not found, already terminated");
            Ok(false)
        }
        Err(e) => Err(Error::CommandFailed(format!(
            "kill -{} {} failed: {}",
            sig.as_str(),
            pid,
            e
        ))),
    }
}
