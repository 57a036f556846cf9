//! Application layer - Use case services.
//!
//! Services are thin orchestrators that:
//! - Accept domain types as inputs
//! - Use ports (traits) for external dependencies
//! - Return domain types as outputs

mod firewall_service;
mod launcher;
mod port_allocator;

pub use firewall_service::{FirewallLease, FirewallService};
pub use launcher::DevServerLauncher;
pub use port_allocator::PortAllocator;

#[cfg(test)]
pub(crate) mod mocks;
