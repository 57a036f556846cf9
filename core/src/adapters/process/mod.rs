//! Forwarding shutdown signals to the dev server process.
//!
//! # Platform behaviour
//!
//! - Unix: the signal is re-sent to the child PID with `kill(2)`.
//! - Windows: Ctrl+C already reaches every process attached to the console,
//!   so `Interrupt` is not re-sent. `Terminate` ends the child's process tree
//!   with `taskkill /T /F`.

#[cfg(unix)]
mod unix;

#[cfg(windows)]
mod windows;

#[cfg(not(any(unix, windows)))]
compile_error!("Unsupported platform: only Unix and Windows are supported");

use tracing::debug;

use crate::domain::ShutdownSignal;
use crate::error::Result;

/// Forward `signal` to the child identified by `pid`.
///
/// `pid` is `None` once the child has been reaped; forwarding is then a no-op.
///
/// # Returns
///
/// * `Ok(true)` - The signal was delivered
/// * `Ok(false)` - Nothing to do (process gone, or the OS already delivered it)
/// * `Err(Error)` - Delivery failed
pub async fn forward_signal(pid: Option<u32>, signal: ShutdownSignal) -> Result<bool> {
    let Some(pid) = pid else {
        debug!(signal = %signal, "Child already exited, not forwarding");
        return Ok(false);
    };

    #[cfg(unix)]
    let delivered = unix::send_signal(pid, signal);

    #[cfg(windows)]
    let delivered = windows::send_signal(pid, signal).await;

    delivered
}
