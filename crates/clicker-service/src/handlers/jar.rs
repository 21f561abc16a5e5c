//! Milk jar handlers.

use chrono::Utc;
use serde::Serialize;

use clicker_core::{JarProgress, PlayerKey};
use clicker_store::Store;

use crate::error::ServiceError;
use crate::state::AppState;

/// Jar response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JarResponse {
    /// Fill level in percent.
    pub progress: u8,
    /// Whether the jar is full.
    pub completed: bool,
    /// Whether this call filled it.
    pub just_completed: bool,
    /// Jars filled over the player's lifetime.
    pub total_completed: u64,
}

impl JarResponse {
    fn new(jar: &JarProgress, just_completed: bool) -> Self {
        Self {
            progress: jar.progress,
            completed: jar.completed,
            just_completed,
            total_completed: jar.total_completed,
        }
    }
}

/// Show the jar. A player who never filled one sees an empty jar.
pub fn show(state: &AppState, key: PlayerKey) -> Result<JarResponse, ServiceError> {
    let jar = state
        .store
        .get_jar(key)?
        .unwrap_or_else(|| JarProgress::new(key, Utc::now()));
    Ok(JarResponse::new(&jar, false))
}

/// Add one step of milk.
pub fn fill(state: &AppState, key: PlayerKey) -> Result<JarResponse, ServiceError> {
    let now = Utc::now();
    let jar = state.store.fill_jar(key, now)?;
    let just_completed = jar.completed_at == Some(now);
    if just_completed {
        tracing::info!(%key, total = jar.total_completed, "Jar filled");
    }
    Ok(JarResponse::new(&jar, just_completed))
}

/// Empty the jar, keeping the lifetime total.
pub fn empty(state: &AppState, key: PlayerKey) -> Result<JarResponse, ServiceError> {
    let jar = state
        .store
        .empty_jar(key, Utc::now())?
        .ok_or_else(|| ServiceError::NotFound(format!("jar of {key}")))?;
    Ok(JarResponse::new(&jar, false))
}
