//! Economy handlers.
//!
//! Handlers are plain functions over [`AppState`](crate::AppState); a chat
//! front end calls them and renders the response.

pub mod admin;
pub mod business;
pub mod casino;
pub mod jar;
pub mod ledger;

use clicker_core::{PlayerKey, PlayerRecord};
use clicker_store::Store;

use crate::error::ServiceError;
use crate::state::AppState;

/// Load a player or fail with `NotFound`.
pub(crate) fn require_player(
    state: &AppState,
    key: PlayerKey,
) -> Result<PlayerRecord, ServiceError> {
    state
        .store
        .get_player(key)?
        .ok_or_else(|| ServiceError::NotFound(format!("player {key}; use start first")))
}
