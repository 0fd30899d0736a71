//! Shutdown coordination
//!
//! One [`ShutdownSignal`] is shared by the HTTP server, the realtime
//! sockets and the process signal listener. It is backed by a `watch`
//! channel, so a waiter that arrives after the trigger returns at once.

use std::fmt;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};

/// Why the process is stopping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Terminate,
    Interrupt,
    Requested,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShutdownReason::Terminate => "SIGTERM",
            ShutdownReason::Interrupt => "SIGINT",
            ShutdownReason::Requested => "requested",
        })
    }
}

#[derive(Clone)]
pub struct ShutdownSignal {
    tx: watch::Sender<Option<ShutdownReason>>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    pub fn is_triggered(&self) -> bool {
        self.tx.borrow().is_some()
    }

    pub fn reason(&self) -> Option<ShutdownReason> {
        *self.tx.borrow()
    }

    pub fn trigger(&self) {
        self.trigger_with(ShutdownReason::Requested);
    }

    /// First trigger wins; later calls keep the original reason.
    pub fn trigger_with(&self, reason: ShutdownReason) {
        let fired = self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason);
            true
        });
        if fired {
            info!(%reason, "🛑 Shutdown triggered");
        }
    }

    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so this only ends on a trigger.
        let _ = rx.wait_for(Option::is_some).await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
async fn next_os_signal() -> std::io::Result<ShutdownReason> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = signal(SignalKind::terminate())?;
    let mut int = signal(SignalKind::interrupt())?;
    let reason = tokio::select! {
        _ = term.recv() => ShutdownReason::Terminate,
        _ = int.recv() => ShutdownReason::Interrupt,
    };
    Ok(reason)
}

#[cfg(not(unix))]
async fn next_os_signal() -> std::io::Result<ShutdownReason> {
    tokio::signal::ctrl_c().await?;
    Ok(ShutdownReason::Interrupt)
}

/// Trigger `shutdown` on SIGTERM or SIGINT (Ctrl+C elsewhere).
pub async fn listen_for_shutdown_signals(shutdown: ShutdownSignal) {
    match next_os_signal().await {
        Ok(reason) => {
            info!(%reason, "📡 Received OS signal");
            shutdown.trigger_with(reason);
        }
        Err(e) => error!(error = %e, "Failed to install signal handlers"),
    }
}

/// Owns the signal and the grace period given to cleanup.
pub struct ShutdownCoordinator {
    signal: ShutdownSignal,
    grace: Duration,
}

impl ShutdownCoordinator {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            signal: ShutdownSignal::new(),
            grace: Duration::from_secs(timeout_secs),
        }
    }

    pub fn signal(&self) -> ShutdownSignal {
        self.signal.clone()
    }

    pub fn timeout(&self) -> Duration {
        self.grace
    }

    pub fn start_signal_listener(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.signal.clone()));
    }

    /// Wait for the trigger, then run `cleanup` for at most the grace
    /// period. `false` means cleanup was cut off.
    pub async fn shutdown_with_cleanup<F, Fut>(&self, cleanup: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = ()>,
    {
        self.signal.wait().await;
        info!(grace_secs = self.grace.as_secs(), "⏳ Draining before exit");

        let drained = tokio::time::timeout(self.grace, cleanup()).await.is_ok();
        if drained {
            info!("✅ Drained cleanly");
        } else {
            warn!(grace_secs = self.grace.as_secs(), "⚠️ Grace period expired");
        }
        drained
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn late_waiter_returns_immediately() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        tokio::time::timeout(Duration::from_millis(100), signal.wait())
            .await
            .expect("waiter hung");
    }

    #[tokio::test]
    async fn spawned_waiter_wakes_on_trigger() {
        let signal = ShutdownSignal::new();
        let waiter = signal.clone();
        let task = tokio::spawn(async move { waiter.wait().await });
        tokio::task::yield_now().await;

        signal.trigger_with(ShutdownReason::Terminate);
        tokio::time::timeout(Duration::from_millis(200), task)
            .await
            .expect("waiter hung")
            .unwrap();
    }

    #[test]
    fn first_reason_is_kept() {
        let signal = ShutdownSignal::new();
        assert_eq!(signal.reason(), None);
        signal.trigger_with(ShutdownReason::Interrupt);
        signal.trigger();
        assert_eq!(signal.reason(), Some(ShutdownReason::Interrupt));
    }

    #[tokio::test]
    async fn slow_cleanup_reports_false() {
        let coordinator = ShutdownCoordinator::new(0);
        coordinator.signal().trigger();
        let drained = coordinator
            .shutdown_with_cleanup(|| tokio::time::sleep(Duration::from_millis(50)))
            .await;
        assert!(!drained);
    }

    #[tokio::test]
    async fn fast_cleanup_reports_true() {
        let coordinator = ShutdownCoordinator::new(1);
        coordinator.signal().trigger();
        assert!(coordinator.shutdown_with_cleanup(|| async {}).await);
    }
}
