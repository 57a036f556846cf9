//! Windows firewall adapter using `netsh advfirewall`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use super::discovery::find_executable;
use crate::domain::FirewallRule;
use crate::error::{Error, Result};
use crate::ports::FirewallPort;

/// Name of the firewall tool.
const NETSH: &str = "netsh";

/// Default paths to search for netsh when it is not on PATH.
const NETSH_PATHS: &[&str] = &[r"C:\Windows\System32\netsh.exe"];

/// Timeout for a single netsh invocation.
pub const DEFAULT_FIREWALL_TIMEOUT: Duration = Duration::from_secs(15);

/// Firewall adapter that shells out to `netsh`.
#[derive(Debug, Clone)]
pub struct NetshFirewall {
    netsh_path: PathBuf,
    timeout: Duration,
}

impl NetshFirewall {
    /// Locate netsh. Returns `None` when the tool is not installed.
    pub fn discover() -> Option<Self> {
        find_executable(NETSH, NETSH_PATHS).map(Self::with_path)
    }

    /// Use a specific netsh binary.
    pub fn with_path(netsh_path: impl Into<PathBuf>) -> Self {
        Self {
            netsh_path: netsh_path.into(),
            timeout: DEFAULT_FIREWALL_TIMEOUT,
        }
    }

    /// Override the per-command timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path of the netsh binary in use.
    pub fn path(&self) -> &Path {
        &self.netsh_path
    }

    /// Executes netsh with the given arguments.
    async fn execute(&self, args: &[String]) -> Result<()> {
        debug!(tool = %self.netsh_path.display(), args = ?args, "Running firewall command");

        let result = timeout(self.timeout, async {
            Command::new(&self.netsh_path)
                .args(args)
                .kill_on_drop(true)
                .output()
                .await
        })
        .await;

        match result {
            Ok(Ok(output)) => {
                if output.status.success() {
                    return Ok(());
                }

                // netsh reports most failures on stdout
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);
                let detail = format!("{} {}", stdout.trim(), stderr.trim());
                Err(Error::CommandFailed(format!(
                    "{} {} exited with {}: {}",
                    NETSH,
                    args.join(" "),
                    output.status,
                    detail.trim()
                )))
            }
            Ok(Err(e)) => Err(Error::Io(e)),
            Err(_) => Err(Error::Timeout(format!(
                "{} {} did not finish within {:?}",
                NETSH,
                args.join(" "),
                self.timeout
            ))),
        }
    }
}

impl FirewallPort for NetshFirewall {
    async fn add_rule(&self, rule: &FirewallRule) -> Result<()> {
        self.execute(&add_rule_args(rule)).await
    }

    async fn delete_rule(&self, rule: &FirewallRule) -> Result<()> {
        self.execute(&delete_rule_args(rule)).await
    }
}

/// Arguments for `netsh advfirewall firewall add rule`.
pub(crate) fn add_rule_args(rule: &FirewallRule) -> Vec<String> {
    vec![
        "advfirewall".to_string(),
        "firewall".to_string(),
        "add".to_string(),
        "rule".to_string(),
        format!("name={}", rule.name),
        "dir=in".to_string(),
        "action=allow".to_string(),
        format!("protocol={}", rule.protocol()),
        format!("localport={}", rule.port),
    ]
}

/// Arguments for `netsh advfirewall firewall delete rule`.
pub(crate) fn delete_rule_args(rule: &FirewallRule) -> Vec<String> {
    vec![
        "advfirewall".to_string(),
        "firewall".to_string(),
        "delete".to_string(),
        "rule".to_string(),
        format!("name={}", rule.name),
    ]
}
