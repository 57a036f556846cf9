//! Windows process termination via `taskkill`.

use tokio::process::Command;
use tracing::debug;

use crate::domain::ShutdownSignal;
use crate::error::{Error, Result};

pub(super) async fn send_signal(pid: u32, signal: ShutdownSignal) -> Result<bool> {
    if signal == ShutdownSignal::Interrupt {
        debug!(pid = pid, "Ctrl+C is delivered to the whole console, not forwarding");
        return Ok(false);
    }

    debug!(pid = pid, "Executing taskkill /T /F");

    // npx.cmd runs node under cmd.exe, so the whole tree has to go
    let output = Command::new("taskkill")
        .arg("/PID")
        .arg(pid.to_string())
        .arg("/T")
        .arg("/F")
        .output()
        .await?;

    if output.status.success() {
        return Ok(true);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let combined = format!("{} {}", stdout, stderr);

    if combined.contains("not found") || combined.contains("could not be found") {
        debug!(pid = pid, "Process not found");
        return Ok(false);
    }

    Err(Error::CommandFailed(format!(
        "taskkill /PID {} /T /F failed: {}",
        pid,
        combined.trim()
    )))
}
