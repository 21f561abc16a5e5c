//! Clicker Service - economy core for the clicker chat bot
//!
//! This is the main entry point. It loads configuration, opens the store,
//! runs the income engine and the flusher, and flushes once more on exit.

use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clicker_service::{income, persistence, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,clicker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Clicker Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        data_dir = %config.data_dir,
        income_interval_secs = config.income_interval_secs,
        flush_interval_secs = config.flush_interval_secs,
        click_cooldown_ms = config.click_cooldown_ms,
        owner_configured = config.owner_id.is_some(),
        min_bet = config.min_bet,
        "Service configuration loaded"
    );

    // Open the JSON store
    let state = AppState::open(config)?;

    // Background tasks
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let income_task = income::spawn_income_engine(
        state.store.clone(),
        state.config.income_interval(),
        shutdown_rx.clone(),
    );
    let flusher_task = persistence::spawn_flusher(
        state.store.clone(),
        state.config.flush_interval(),
        shutdown_rx,
    );

    tracing::info!("Economy running; press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");

    shutdown_tx.send(true)?;
    income_task.await?;
    flusher_task.await?;

    tracing::info!("Clicker Service stopped");
    Ok(())
}
