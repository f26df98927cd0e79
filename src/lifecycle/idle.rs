//! Idle loop.
//!
//! Keeps the process alive as a signal target. Each iteration waits for the
//! first of: the idle interval elapsing, a delivered signal, or shutdown.

use std::io::Write;
use std::time::Duration;

use futures_util::stream::{self, BoxStream, SelectAll, StreamExt};

use crate::lifecycle::shutdown::{stopped, ShutdownReceiver};
use crate::signals::{SignalHandler, SignalListener};

/// Run-until-cancelled loop dispatching delivered signals to the handler.
pub struct IdleLoop<W> {
    handler: SignalHandler<W>,
    deliveries: SelectAll<BoxStream<'static, i32>>,
    interval: Duration,
}

impl<W: Write> IdleLoop<W> {
    pub fn new(handler: SignalHandler<W>, listeners: Vec<SignalListener>, interval: Duration) -> Self {
        let deliveries = stream::select_all(listeners.into_iter().map(into_stream));
        Self {
            handler,
            deliveries,
            interval,
        }
    }

    /// Run the loop.
    ///
    /// Without a shutdown receiver this never returns. With one, the loop
    /// returns the handler's writer once shutdown is triggered or its token is
    /// dropped.
    pub async fn run(mut self, mut shutdown: Option<ShutdownReceiver>) -> W {
        tracing::debug!(
            listeners = self.deliveries.len(),
            interval_ms = self.interval.as_millis() as u64,
            "Entering idle loop"
        );

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {
                    tracing::trace!("Idle interval elapsed");
                }
                Some(signal) = self.deliveries.next(), if !self.deliveries.is_empty() => {
                    if let Err(e) = self.handler.handle(signal) {
                        tracing::error!(error = %e, "Failed to report signal");
                    }
                }
                _ = cancelled(&mut shutdown) => {
                    tracing::info!("Idle loop received shutdown signal, exiting loop");
                    break;
                }
            }
        }

        self.handler.into_writer()
    }
}

fn into_stream(listener: SignalListener) -> BoxStream<'static, i32> {
    stream::unfold(listener, |mut listener| async move {
        listener.recv().await.map(|()| (listener.number, listener))
    })
    .boxed()
}

async fn cancelled(shutdown: &mut Option<ShutdownReceiver>) {
    match shutdown {
        Some(rx) => stopped(rx).await,
        None => std::future::pending().await,
    }
}
