//! Business income engine.
//!
//! Every interval the engine credits each player with the profit of their
//! businesses. A failed tick is logged and the engine waits for the next one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use clicker_store::{IncomeReport, Store};

/// Run one income tick and log its result.
///
/// Returns `None` if the tick failed.
pub fn run_income_tick<S: Store + ?Sized>(store: &S) -> Option<IncomeReport> {
    match store.accrue_income() {
        Ok(report) => {
            for key in &report.orphaned {
                tracing::warn!(%key, "Skipping businesses of unknown player");
            }
            if report.players_credited > 0 {
                tracing::debug!(
                    players = report.players_credited,
                    total = %report.total_credited,
                    "Business income credited"
                );
            }
            Some(report)
        }
        Err(err) => {
            tracing::error!(error = %err, "Income tick failed");
            None
        }
    }
}

/// Start the income engine.
///
/// The first tick happens one full `interval` after start. The task ends
/// when `shutdown` turns true or its sender is dropped.
pub fn spawn_income_engine<S>(
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
        tracing::info!(interval_secs = interval.as_secs(), "Income engine started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    run_income_tick(store.as_ref());
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Income engine stopped");
    })
}
