//! LAN address discovery.

use std::net::{IpAddr, Ipv4Addr};

use tokio::net::UdpSocket;
use tracing::debug;

/// Public address used only to pick the outbound interface; no packet is sent.
const ROUTE_PROBE_ADDR: &str = "8.8.8.8:80";

/// Best-effort LAN address of this machine.
///
/// Connecting a UDP socket selects the interface the OS would route through,
/// whose address is then read back. Falls back to `127.0.0.1` when there is no
/// route (e.g. offline).
pub async fn local_ip() -> IpAddr {
    match route_local_ip().await {
        Ok(ip) => ip,
        Err(e) => {
            debug!(error = %e, "Could not determine LAN address, using loopback");
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

async fn route_local_ip() -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
    socket.connect(ROUTE_PROBE_ADDR).await?;
    Ok(socket.local_addr()?.ip())
}

/// URL the dev server is reachable at on `ip`.
pub fn http_url(ip: IpAddr, port: u16) -> String {
    match ip {
        IpAddr::V4(v4) => format!("http://{}:{}", v4, port),
        IpAddr::V6(v6) => format!("http://[{}]:{}", v6, port),
    }
}
