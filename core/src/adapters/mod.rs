//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`,
//! plus the OS plumbing the launcher needs around the dev server process.

pub mod discovery;
pub mod firewall;
pub mod network;
pub mod port_file;
pub mod probe;
pub mod process;
pub mod signals;

// Re-export main types for convenience
pub use firewall::NetshFirewall;
pub use port_file::PortFile;
pub use probe::TcpProbe;
