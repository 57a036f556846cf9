//! TCP bind probe.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tokio::net::TcpListener;
use tracing::debug;

use crate::ports::PortProbePort;

/// Checks port availability by binding a listener and dropping it.
#[derive(Debug, Clone, Copy)]
pub struct TcpProbe {
    host: IpAddr,
}

impl TcpProbe {
    /// Create a probe that binds on `host`.
    pub fn new(host: IpAddr) -> Self {
        Self { host }
    }

    /// Create a probe that binds on all IPv4 interfaces (`0.0.0.0`).
    pub fn all_interfaces() -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::all_interfaces()
    }
}

impl PortProbePort for TcpProbe {
    async fn is_available(&self, port: u16) -> bool {
        let addr = SocketAddr::new(self.host, port);

        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                debug!(port = port, "Port is free");
                true
            }
            Err(e) => {
                debug!(port = port, error = %e, "Port is not available");
                false
            }
        }
    }
}
