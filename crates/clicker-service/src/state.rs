//! Application state.

use std::sync::Arc;

use clicker_store::{JsonStore, StoreError};

use crate::config::ServiceConfig;

/// Application state shared across handlers and background tasks.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<JsonStore>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<JsonStore>, config: ServiceConfig) -> Self {
        if config.owner_id.is_none() {
            tracing::warn!("OWNER_ID not configured - admin rights cannot be granted");
        }
        Self { store, config }
    }

    /// Open the store in the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be opened.
    pub fn open(config: ServiceConfig) -> Result<Self, StoreError> {
        let store = JsonStore::open(&config.data_dir)?;
        Ok(Self::new(Arc::new(store), config))
    }
}
