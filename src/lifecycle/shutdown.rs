//! Cancellation for the idle loop.
//!
//! The binary never cancels: it idles until a signal it did not intercept ends
//! the process. Tests and embedders hold a `Shutdown` to stop the loop
//! deterministically instead of killing the process.

use tokio::sync::watch;

/// Stop flag shared between the owner and any number of idle loops.
///
/// Once triggered it stays triggered, so a loop that subscribes late still
/// stops on its first iteration.
pub struct Shutdown {
    stopped: watch::Sender<bool>,
}

/// Receiving half handed to `IdleLoop::run`.
pub type ShutdownReceiver = watch::Receiver<bool>;

impl Shutdown {
    pub fn new() -> Self {
        let (stopped, _) = watch::channel(false);
        Self { stopped }
    }

    pub fn subscribe(&self) -> ShutdownReceiver {
        self.stopped.subscribe()
    }

    /// Stop every loop subscribed now or later.
    pub fn trigger(&self) {
        self.stopped.send_replace(true);
        tracing::debug!(loops = self.stopped.receiver_count(), "Shutdown triggered");
    }

    pub fn is_triggered(&self) -> bool {
        *self.stopped.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once `rx` reports a trigger or its `Shutdown` is dropped.
pub async fn stopped(rx: &mut ShutdownReceiver) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}
