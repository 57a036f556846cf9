//! Host firewall port (interface).

use crate::domain::FirewallRule;
use crate::error::Result;

/// Port for managing inbound allow rules on the host firewall.
///
/// This trait defines the interface for adding and removing rules.
/// Implementations wrap a platform tool (e.g. `netsh` on Windows).
pub trait FirewallPort: Send + Sync {
    /// Register an inbound TCP allow rule.
    fn add_rule(&self, rule: &FirewallRule)
        -> impl std::future::Future<Output = Result<()>> + Send;

    /// Remove a previously registered rule by name.
    fn delete_rule(
        &self,
        rule: &FirewallRule,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
