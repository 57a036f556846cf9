//! In-memory port implementations shared by the application tests.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::domain::{FirewallRule, ShutdownSignal};
use crate::error::{Error, Result};
use crate::ports::{FirewallPort, PortProbePort};

/// Probe that reports "busy" for the first `busy` calls, then "free".
#[derive(Clone)]
pub(crate) struct MockProbe {
    busy: u32,
    calls: Arc<AtomicU32>,
    probed: Arc<Mutex<Vec<u16>>>,
}

impl MockProbe {
    pub(crate) fn busy_for(busy: u32) -> Self {
        Self {
            busy,
            calls: Arc::new(AtomicU32::new(0)),
            probed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn probed(&self) -> Vec<u16> {
        self.probed.lock().clone()
    }
}

impl PortProbePort for MockProbe {
    async fn is_available(&self, port: u16) -> bool {
        self.probed.lock().push(port);
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        call >= self.busy
    }
}

/// A recorded firewall call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FirewallCall {
    Add(String),
    Delete(String),
}

/// Firewall that records calls and optionally fails them.
#[derive(Clone, Default)]
pub(crate) struct MockFirewall {
    calls: Arc<Mutex<Vec<FirewallCall>>>,
    fail_add: bool,
    fail_delete: bool,
    on_add: Option<(UnboundedSender<ShutdownSignal>, ShutdownSignal)>,
}

impl MockFirewall {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_add() -> Self {
        Self {
            fail_add: true,
            ..Self::default()
        }
    }

    pub(crate) fn failing_delete() -> Self {
        Self {
            fail_delete: true,
            ..Self::default()
        }
    }

    /// Queues `signal` while the add is in flight, like a Ctrl+C pressed
    /// during a slow `netsh` call.
    pub(crate) fn signalling_on_add(
        signals: UnboundedSender<ShutdownSignal>,
        signal: ShutdownSignal,
    ) -> Self {
        Self {
            on_add: Some((signals, signal)),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<FirewallCall> {
        self.calls.lock().clone()
    }

    pub(crate) fn deletes(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, FirewallCall::Delete(_)))
            .count()
    }
}

impl FirewallPort for MockFirewall {
    async fn add_rule(&self, rule: &FirewallRule) -> Result<()> {
        self.calls.lock().push(FirewallCall::Add(rule.name.clone()));
        if let Some((signals, signal)) = &self.on_add {
            let _ = signals.send(*signal);
        }
        if self.fail_add {
            return Err(Error::CommandFailed("add rejected".to_string()));
        }
        Ok(())
    }

    async fn delete_rule(&self, rule: &FirewallRule) -> Result<()> {
        self.calls.lock().push(FirewallCall::Delete(rule.name.clone()));
        if self.fail_delete {
            return Err(Error::CommandFailed("delete rejected".to_string()));
        }
        Ok(())
    }
}

/// Counts WARN events emitted on the current thread while alive.
pub(crate) struct WarningCount {
    count: Arc<AtomicUsize>,
    _guard: DefaultGuard,
}

impl WarningCount {
    pub(crate) fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

struct CountWarnings(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for CountWarnings {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Install a thread-local subscriber counting warnings. Only sees events
/// from the calling thread, so use it with single-threaded tests.
pub(crate) fn capture_warnings() -> WarningCount {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(CountWarnings(count.clone()));
    WarningCount {
        count,
        _guard: tracing::subscriber::set_default(subscriber),
    }
}
