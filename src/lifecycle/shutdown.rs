//! Graceful stop for the HTTP server.
//!
//! `main` arms the coordinator with the OS signal watcher; integration tests
//! trigger it directly when their spawned gateway goes out of scope. Either
//! way the server stops accepting connections and drains in-flight
//! forwards, each still bounded by the request timeout.

use std::future::Future;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::lifecycle::signals;

#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver handed to `HttpServer::run`.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Stop the server. Repeated calls and calls with no server running are no-ops.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Spawn a task that triggers shutdown once `event` completes.
    pub fn trigger_when<F>(&self, event: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let shutdown = self.clone();
        tokio::spawn(async move {
            event.await;
            tracing::info!("Shutdown requested");
            shutdown.trigger();
        })
    }

    /// Trigger shutdown on SIGINT or SIGTERM.
    pub fn trigger_on_signal(&self) -> JoinHandle<()> {
        self.trigger_when(signals::wait_for_signal())
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_trigger_stops_every_subscriber() {
        let shutdown = Shutdown::new();
        let mut server = shutdown.subscribe();
        let mut metrics = shutdown.subscribe();

        shutdown.trigger();
        assert!(server.recv().await.is_ok());
        assert!(metrics.recv().await.is_ok());
    }

    #[tokio::test]
    async fn test_trigger_when_waits_for_event() {
        let shutdown = Shutdown::new();
        let mut server = shutdown.subscribe();
        let (fire, event) = oneshot::channel::<()>();

        let watcher = shutdown.trigger_when(async move {
            let _ = event.await;
        });
        assert!(server.try_recv().is_err());

        fire.send(()).unwrap();
        watcher.await.unwrap();
        assert!(server.recv().await.is_ok());
    }

    #[test]
    fn test_trigger_without_running_server() {
        Shutdown::default().trigger();
    }
}
