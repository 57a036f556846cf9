//! Domain layer - Pure data models.
//!
//! This module contains the values the launcher reasons about.
//! These types have no I/O dependencies and can be tested in isolation.

mod exit;
mod port;
mod rule;
mod signal;

// Re-export all domain types
pub use exit::exit_code;
pub use port::PortRange;
pub use rule::{FirewallRule, DEFAULT_RULE_PREFIX};
pub use signal::ShutdownSignal;
