//! devlaunch Core Library
//!
//! Supervises a bundler dev server bound to a freshly allocated port.
//! Provides functionality to:
//! - Pick a random free TCP port within a range
//! - Open and close a temporary inbound firewall rule for that port
//! - Spawn the dev server with the port injected, forwarding shutdown signals
//! - Mirror the dev server's exit code
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure data models
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services
//!
//! # Platform Support
//! - Windows: Uses `netsh advfirewall` for firewall rules
//! - macOS / Linux: No firewall tool, runs in degraded mode

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

// Re-export domain types (primary API)
pub use domain::{exit_code, FirewallRule, PortRange, ShutdownSignal};

// Re-export other commonly used types
pub use adapters::{NetshFirewall, TcpProbe};
pub use application::{DevServerLauncher, FirewallLease, FirewallService, PortAllocator};
pub use config::{ConfigStore, DevCommand, LaunchConfig};
pub use error::{Error, Result};
