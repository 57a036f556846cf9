//! Dev server launcher - the main use case.
//!
//! Sequence: allocate port → open firewall rule → publish port file →
//! spawn dev server → wait (forwarding signals) → close rule → remove port file.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use super::{FirewallLease, FirewallService, PortAllocator};
use crate::adapters::network::{http_url, local_ip};
use crate::adapters::process::forward_signal;
use crate::adapters::{NetshFirewall, PortFile, TcpProbe};
use crate::config::LaunchConfig;
use crate::domain::{exit_code, ShutdownSignal};
use crate::error::{Error, Result};
use crate::ports::{FirewallPort, PortProbePort};

/// Runs one dev server on a freshly allocated port and cleans up after it.
pub struct DevServerLauncher<P: PortProbePort, F: FirewallPort> {
    config: LaunchConfig,
    project_dir: PathBuf,
    allocator: PortAllocator<P>,
    firewall: FirewallService<F>,
}

impl DevServerLauncher<TcpProbe, NetshFirewall> {
    /// Build a launcher wired to the host: TCP bind probe and `netsh`.
    ///
    /// When the configuration enables the firewall but `netsh` is missing,
    /// the degraded-mode warning is logged here.
    pub fn for_host(config: LaunchConfig, project_dir: impl Into<PathBuf>) -> Self {
        let probe = TcpProbe::new(config.bind_host);

        let firewall = if config.firewall {
            let timeout = Duration::from_secs(config.firewall_timeout_secs);
            let netsh = NetshFirewall::discover().map(|netsh| netsh.with_timeout(timeout));
            if let Some(netsh) = &netsh {
                debug!(path = %netsh.path().display(), "Found firewall tool");
            }
            FirewallService::new(netsh, config.rule_name_prefix.clone())
        } else {
            FirewallService::disabled(config.rule_name_prefix.clone())
        };

        Self::new(config, project_dir, probe, firewall)
    }
}

impl<P: PortProbePort, F: FirewallPort> DevServerLauncher<P, F> {
    /// Create a launcher from its parts.
    pub fn new(
        config: LaunchConfig,
        project_dir: impl Into<PathBuf>,
        probe: P,
        firewall: FirewallService<F>,
    ) -> Self {
        let allocator = PortAllocator::new(probe, config.port_range, config.max_attempts);
        Self {
            config,
            project_dir: project_dir.into(),
            allocator,
            firewall,
        }
    }

    /// Find a free port in the configured range.
    pub async fn allocate_port(&self) -> Result<u16> {
        self.allocator.allocate().await
    }

    /// Add the inbound rule for `port`. `None` when degraded or the add failed.
    pub async fn open_firewall_rule(&self, port: u16) -> Option<FirewallLease> {
        self.firewall.open(port).await
    }

    /// Start the dev server on `port` with inherited stdio.
    pub fn spawn_dev_server(&self, port: u16) -> Result<Child> {
        let command = &self.config.command;
        info!(command = %command, port = port, "Starting dev server");

        let child = self
            .build_command(port)
            .spawn()
            .map_err(|source| Error::Spawn {
                program: command.program.clone(),
                source,
            })?;

        debug!(pid = ?child.id(), "Dev server spawned");
        Ok(child)
    }

    /// Remove the rule, if one was opened. Never fails.
    pub async fn close_firewall_rule(&self, lease: Option<FirewallLease>) {
        if let Some(lease) = lease {
            self.firewall.close(lease).await;
        }
    }

    /// Run the whole launch sequence and return the dev server's exit code.
    ///
    /// Signals from `signals` are forwarded to the dev server while it runs.
    /// A signal received before the dev server starts stops the launch
    /// instead. Cleanup happens once however many signals arrive.
    pub async fn run(&self, mut signals: UnboundedReceiver<ShutdownSignal>) -> Result<i32> {
        let port = self.allocate_port().await?;
        info!(port = port, "Allocated dev server port");

        if let Some(signal) = pending_shutdown(&mut signals) {
            info!(signal = %signal, "Shutdown requested before dev server start");
            return Ok(signal.exit_code());
        }

        let lease = self.open_firewall_rule(port).await;
        let port_file = self.port_file();
        if let Some(file) = &port_file {
            if let Err(e) = file.write(port).await {
                warn!(path = %file.path().display(), error = %e, "Failed to write port file");
            }
        }

        // The firewall command can take seconds; a Ctrl+C pressed meanwhile
        // has no child to reach yet
        if let Some(signal) = pending_shutdown(&mut signals) {
            info!(signal = %signal, "Shutdown requested before dev server start");
            self.cleanup(lease, port_file.as_ref()).await;
            return Ok(signal.exit_code());
        }

        let mut child = match self.spawn_dev_server(port) {
            Ok(child) => child,
            Err(e) => {
                self.cleanup(lease, port_file.as_ref()).await;
                return Err(e);
            }
        };

        self.log_urls(port).await;

        let pid = child.id();
        let status = loop {
            tokio::select! {
                status = child.wait() => break status,
                Some(signal) = signals.recv() => {
                    info!(signal = %signal, "Forwarding signal to dev server");
                    if let Err(e) = forward_signal(pid, signal).await {
                        warn!(signal = %signal, error = %e, "Failed to forward signal");
                    }
                }
            }
        };

        self.cleanup(lease, port_file.as_ref()).await;

        let code = exit_code(status?);
        info!(code = code, "Dev server exited");
        Ok(code)
    }

    pub(crate) fn build_command(&self, port: u16) -> Command {
        let mut cmd = Command::new(&self.config.command.program);
        cmd.args(self.config.command.args_for(port))
            .current_dir(&self.project_dir)
            .env(&self.config.port_env, port.to_string())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }

    fn port_file(&self) -> Option<PortFile> {
        self.config
            .port_file
            .as_ref()
            .map(|path| PortFile::new(self.project_dir.join(path)))
    }

    async fn cleanup(&self, lease: Option<FirewallLease>, port_file: Option<&PortFile>) {
        self.close_firewall_rule(lease).await;

        if let Some(file) = port_file {
            if let Err(e) = file.remove().await {
                warn!(path = %file.path().display(), error = %e, "Failed to remove port file");
            }
        }
    }

    async fn log_urls(&self, port: u16) {
        let lan = local_ip().await;
        info!(url = %http_url(IpAddr::V4(Ipv4Addr::LOCALHOST), port), "Local");
        info!(url = %http_url(lan, port), "Network");
    }
}

/// First shutdown signal already queued, if any. Drains the queue.
fn pending_shutdown(signals: &mut UnboundedReceiver<ShutdownSignal>) -> Option<ShutdownSignal> {
    let mut pending = None;
    while let Ok(signal) = signals.try_recv() {
        pending.get_or_insert(signal);
    }
    pending
}
