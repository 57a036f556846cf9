//! Firewall rule domain model.

use serde::{Deserialize, Serialize};

/// Rule name prefix used when none is configured.
pub const DEFAULT_RULE_PREFIX: &str = "vite-dev";

/// An inbound TCP allow rule for a single local port.
///
/// The name is derived from the port, so adding and deleting the same port
/// always targets the same rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FirewallRule {
    /// Rule name as registered with the host firewall.
    pub name: String,
    /// Local port the rule allows.
    pub port: u16,
}

impl FirewallRule {
    /// Build the rule for `port`, named `<prefix>-<port>`.
    pub fn for_port(prefix: &str, port: u16) -> Self {
        Self {
            name: format!("{}-{}", prefix, port),
            port,
        }
    }

    /// Protocol the rule applies to.
    pub fn protocol(&self) -> &'static str {
        "TCP"
    }
}

impl std::fmt::Display for FirewallRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (inbound {}/{})", self.name, self.protocol(), self.port)
    }
}
