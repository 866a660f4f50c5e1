//! Graceful shutdown
//!
//! `ShutdownSignal` flips once on SIGINT/SIGTERM; the HTTP server stops
//! accepting connections and drains in-flight requests, then cleanup runs
//! under `shutdown_timeout`.

use std::future::Future;
use std::time::Duration;

use log::{error, info, warn};
use tokio::sync::watch;

/// Cloneable handle that resolves once shutdown is requested
#[derive(Clone)]
pub struct ShutdownSignal {
    tx: watch::Sender<bool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn trigger(&self) {
        if !self.tx.send_replace(true) {
            info!("Shutdown signal triggered");
        }
    }

    /// Wait until `trigger` has been called. Returns immediately if it already was.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // Sender lives in self, so the channel cannot close while waiting.
        let _ = rx.wait_for(|triggered| *triggered).await;
    }

    /// Spawn a task that triggers this signal on SIGINT or SIGTERM.
    pub fn listen_for_os_signals(&self) {
        let signal = self.clone();
        tokio::spawn(async move {
            wait_for_os_signal().await;
            signal.trigger();
        });
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
async fn wait_for_os_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut sigterm, mut sigint) =
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(term), Ok(int)) => (term, int),
            (Err(e), _) | (_, Err(e)) => {
                error!("Failed to install signal handlers: {}", e);
                return std::future::pending().await;
            }
        };

    tokio::select! {
        _ = sigterm.recv() => info!("Received SIGTERM"),
        _ = sigint.recv() => info!("Received SIGINT (Ctrl+C)"),
    }
}

#[cfg(not(unix))]
async fn wait_for_os_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C"),
        Err(e) => {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Run `cleanup`, giving up after `timeout_secs`.
///
/// Returns false when the timeout fired.
pub async fn run_cleanup<F>(timeout_secs: u64, cleanup: F) -> bool
where
    F: Future<Output = ()>,
{
    match tokio::time::timeout(Duration::from_secs(timeout_secs), cleanup).await {
        Ok(()) => true,
        Err(_) => {
            warn!("Cleanup timed out after {}s", timeout_secs);
            false
        }
    }
}
