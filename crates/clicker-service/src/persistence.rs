//! Periodic persistence.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use clicker_store::Store;

/// Flush dirty domains, logging any failure.
///
/// Returns whether the flush succeeded.
pub fn flush_now<S: Store + ?Sized>(store: &S) -> bool {
    match store.flush() {
        Ok(report) => {
            if !report.written.is_empty() {
                tracing::debug!(domains = report.written.len(), "Flushed");
            }
            true
        }
        Err(err) => {
            // Domains stay dirty and are retried on the next flush.
            tracing::error!(error = %err, "Flush failed");
            false
        }
    }
}

/// Run `flush_now` on the blocking pool so file writes stay off the
/// async workers.
async fn flush_blocking<S: Store + 'static>(store: &Arc<S>) -> bool {
    let store = Arc::clone(store);
    match tokio::task::spawn_blocking(move || flush_now(store.as_ref())).await {
        Ok(flushed) => flushed,
        Err(err) => {
            tracing::error!(error = %err, "Flush task failed");
            false
        }
    }
}

/// Start the flusher.
///
/// Writes dirty domains every `interval`. On shutdown it flushes once more
/// before ending.
pub fn spawn_flusher<S>(
    store: Arc<S>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    S: Store + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    flush_blocking(&store).await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        if flush_blocking(&store).await {
            tracing::info!("Final flush complete");
        }
    })
}
