//! Firewall rule lifecycle service.

use tracing::{debug, info, warn};

use crate::domain::FirewallRule;
use crate::ports::FirewallPort;

/// Proof that a firewall rule was added.
///
/// Not `Clone`: `FirewallService::close` consumes it, so each added rule is
/// deleted at most once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an open rule must be passed to FirewallService::close"]
pub struct FirewallLease {
    rule: FirewallRule,
}

impl FirewallLease {
    /// The rule this lease covers.
    pub fn rule(&self) -> &FirewallRule {
        &self.rule
    }
}

/// Opens and closes inbound rules, or does nothing in degraded mode.
///
/// Every failure is logged and swallowed; a firewall problem never stops the
/// dev server from running.
pub struct FirewallService<F: FirewallPort> {
    backend: Option<F>,
    prefix: String,
}

impl<F: FirewallPort> FirewallService<F> {
    /// Create a service around a discovered backend.
    ///
    /// `None` means the firewall tool is not installed: a warning is logged
    /// here, once, and every later call is a no-op.
    pub fn new(backend: Option<F>, prefix: impl Into<String>) -> Self {
        if backend.is_none() {
            warn!(
                "Firewall tool not found, no inbound rule will be added. \
                 Make sure the port is reachable from the LAN or configure the firewall manually."
            );
        }

        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    /// Create a service that never touches the firewall, by user choice.
    pub fn disabled(prefix: impl Into<String>) -> Self {
        info!("Firewall management disabled");
        Self {
            backend: None,
            prefix: prefix.into(),
        }
    }

    /// True when no rule will ever be added.
    #[cfg(test)]
    pub(crate) fn is_degraded(&self) -> bool {
        self.backend.is_none()
    }

    /// The rule that `open(port)` would add.
    pub fn rule_for(&self, port: u16) -> FirewallRule {
        FirewallRule::for_port(&self.prefix, port)
    }

    /// Add an inbound allow rule for `port`.
    ///
    /// Returns `None` in degraded mode or when the add command fails.
    pub async fn open(&self, port: u16) -> Option<FirewallLease> {
        let backend = self.backend.as_ref()?;
        let rule = self.rule_for(port);

        match backend.add_rule(&rule).await {
            Ok(()) => {
                info!(rule = %rule.name, port = port, "Opened firewall port");
                Some(FirewallLease { rule })
            }
            Err(e) => {
                warn!(rule = %rule.name, port = port, error = %e, "Failed to open firewall port");
                None
            }
        }
    }

    /// Delete the rule covered by `lease`. Errors are logged, never returned.
    pub async fn close(&self, lease: FirewallLease) {
        let Some(backend) = self.backend.as_ref() else {
            debug!(rule = %lease.rule.name, "No firewall backend, nothing to close");
            return;
        };

        match backend.delete_rule(&lease.rule).await {
            Ok(()) => info!(rule = %lease.rule.name, port = lease.rule.port, "Closed firewall port"),
            Err(e) => warn!(
                rule = %lease.rule.name,
                port = lease.rule.port,
                error = %e,
                "Failed to close firewall port"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mocks::{capture_warnings, FirewallCall, MockFirewall};

    #[tokio::test]
    async fn test_open_and_close() {
        let firewall = MockFirewall::new();
        let service = FirewallService::new(Some(firewall.clone()), "vite-dev");
        assert!(!service.is_degraded());

        let lease = service.open(43121).await.unwrap();
        assert_eq!(lease.rule().name, "vite-dev-43121");

        service.close(lease).await;

        assert_eq!(
            firewall.calls(),
            vec![
                FirewallCall::Add("vite-dev-43121".to_string()),
                FirewallCall::Delete("vite-dev-43121".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_degraded_mode_makes_no_calls() {
        let service: FirewallService<MockFirewall> = FirewallService::new(None, "vite-dev");
        assert!(service.is_degraded());
        assert!(service.open(43121).await.is_none());

        let disabled: FirewallService<MockFirewall> = FirewallService::disabled("vite-dev");
        assert!(disabled.is_degraded());
        assert!(disabled.open(43121).await.is_none());
    }

    #[tokio::test]
    async fn test_missing_tool_warns_once() {
        let warnings = capture_warnings();

        let service: FirewallService<MockFirewall> = FirewallService::new(None, "vite-dev");
        assert!(service.open(43121).await.is_none());
        assert!(service.open(43122).await.is_none());
        service
            .close(FirewallLease {
                rule: service.rule_for(43121),
            })
            .await;

        assert_eq!(warnings.count(), 1);

        let _disabled: FirewallService<MockFirewall> = FirewallService::disabled("vite-dev");
        assert_eq!(warnings.count(), 1);
    }

    #[tokio::test]
    async fn test_failed_add_yields_no_lease() {
        let firewall = MockFirewall::failing_add();
        let service = FirewallService::new(Some(firewall.clone()), "vite-dev");

        assert!(service.open(20000).await.is_none());
        assert_eq!(firewall.calls().len(), 1);
        assert_eq!(firewall.deletes(), 0);
    }

    #[tokio::test]
    async fn test_failed_delete_is_swallowed() {
        let firewall = MockFirewall::failing_delete();
        let service = FirewallService::new(Some(firewall.clone()), "vite-dev");

        let lease = service.open(20000).await.unwrap();
        service.close(lease).await;
        assert_eq!(firewall.deletes(), 1);
    }

    #[test]
    fn test_rule_name_is_deterministic() {
        let service = FirewallService::new(Some(MockFirewall::new()), "dev");
        assert_eq!(service.rule_for(12345), service.rule_for(12345));
        assert_eq!(service.rule_for(12345).name, "dev-12345");
    }
}
