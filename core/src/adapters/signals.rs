//! OS shutdown signal listener.

use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::ShutdownSignal;
use crate::error::Result;

/// Spawns a task that pushes `$kind` into `$tx` each time `$stream` fires.
/// The tokio signal types share `recv()` but no common trait.
macro_rules! relay {
    ($stream:expr, $kind:expr, $tx:expr) => {{
        let mut stream = $stream;
        let kind: ShutdownSignal = $kind;
        let tx: mpsc::UnboundedSender<ShutdownSignal> = $tx;
        tokio::spawn(async move {
            while stream.recv().await.is_some() {
                debug!(signal = %kind, "Received shutdown signal");
                if tx.send(kind).is_err() {
                    break;
                }
            }
        });
    }};
}

/// Start listening for shutdown signals.
///
/// Every received signal is pushed into the returned channel, so repeated
/// Ctrl+C presses arrive as repeated `Interrupt`s. Installing the handlers
/// replaces the default "terminate immediately" behaviour, which keeps the
/// launcher alive long enough to clean up.
///
/// Must be called from within a tokio runtime.
pub fn listen() -> Result<mpsc::UnboundedReceiver<ShutdownSignal>> {
    let (tx, rx) = mpsc::unbounded_channel();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        relay!(signal(SignalKind::interrupt())?, ShutdownSignal::Interrupt, tx.clone());
        relay!(signal(SignalKind::terminate())?, ShutdownSignal::Terminate, tx.clone());
        relay!(signal(SignalKind::hangup())?, ShutdownSignal::Terminate, tx);
    }

    #[cfg(windows)]
    {
        use tokio::signal::windows::{ctrl_break, ctrl_c, ctrl_close};

        relay!(ctrl_c()?, ShutdownSignal::Interrupt, tx.clone());
        relay!(ctrl_break()?, ShutdownSignal::Terminate, tx.clone());
        relay!(ctrl_close()?, ShutdownSignal::Terminate, tx);
    }

    Ok(rx)
}
