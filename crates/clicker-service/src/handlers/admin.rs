//! Admin handlers.
//!
//! Every handler takes an [`AdminAuth`]; roster changes additionally
//! require the owner.

use serde::Serialize;

use clicker_core::{PlayerKey, UserId};
use clicker_store::{PlayerChange, Store};

use super::ledger::ProfileResponse;
use crate::auth::AdminAuth;
use crate::error::ServiceError;
use crate::state::AppState;

// =============================================================================
// Roster
// =============================================================================

/// Admin roster response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminsResponse {
    /// The configured owner, if any.
    pub owner_id: Option<UserId>,
    /// Users with admin rights, in id order.
    pub admins: Vec<UserId>,
}

/// List the roster. Anyone may look.
pub fn list_admins(state: &AppState) -> Result<AdminsResponse, ServiceError> {
    Ok(AdminsResponse {
        owner_id: state.config.owner_id,
        admins: state.store.list_admins()?,
    })
}

/// Grant admin rights (owner only). Returns false if already an admin.
pub fn grant_admin(
    state: &AppState,
    auth: &AdminAuth,
    user_id: UserId,
) -> Result<bool, ServiceError> {
    require_owner(auth)?;
    let granted = state.store.grant_admin(user_id)?;
    tracing::info!(owner = %auth.user_id, %user_id, granted, "Admin granted");
    Ok(granted)
}

/// Revoke admin rights (owner only). Returns false if not an admin.
pub fn revoke_admin(
    state: &AppState,
    auth: &AdminAuth,
    user_id: UserId,
) -> Result<bool, ServiceError> {
    require_owner(auth)?;
    let revoked = state.store.revoke_admin(user_id)?;
    tracing::info!(owner = %auth.user_id, %user_id, revoked, "Admin revoked");
    Ok(revoked)
}

fn require_owner(auth: &AdminAuth) -> Result<(), ServiceError> {
    if auth.is_owner {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}

// =============================================================================
// Ledger Edits
// =============================================================================

/// Give a player coins.
pub fn add_money(
    state: &AppState,
    auth: &AdminAuth,
    key: PlayerKey,
    amount: i64,
) -> Result<ProfileResponse, ServiceError> {
    require_non_negative("amount", amount)?;
    apply(state, auth, key, PlayerChange::AddMoney(amount))
}

/// Take coins from a player. The balance stops at zero.
pub fn remove_money(
    state: &AppState,
    auth: &AdminAuth,
    key: PlayerKey,
    amount: i64,
) -> Result<ProfileResponse, ServiceError> {
    require_non_negative("amount", amount)?;
    apply(state, auth, key, PlayerChange::AddMoney(-amount))
}

/// Set a player's balance.
pub fn set_money(
    state: &AppState,
    auth: &AdminAuth,
    key: PlayerKey,
    amount: i64,
) -> Result<ProfileResponse, ServiceError> {
    require_non_negative("amount", amount)?;
    apply(state, auth, key, PlayerChange::SetMoney(amount))
}

/// Set a player's click level.
pub fn set_level(
    state: &AppState,
    auth: &AdminAuth,
    key: PlayerKey,
    level: i64,
) -> Result<ProfileResponse, ServiceError> {
    if level < 1 {
        return Err(ServiceError::BadRequest("level must be at least 1".into()));
    }
    apply(state, auth, key, PlayerChange::SetLevel(level))
}

/// Set a player's income per click.
pub fn set_income_per_click(
    state: &AppState,
    auth: &AdminAuth,
    key: PlayerKey,
    amount: i64,
) -> Result<ProfileResponse, ServiceError> {
    if amount < 1 {
        return Err(ServiceError::BadRequest(
            "income per click must be at least 1".into(),
        ));
    }
    apply(state, auth, key, PlayerChange::SetIncomePerClick(amount))
}

/// Set a player's passive income per second.
pub fn set_income_per_sec(
    state: &AppState,
    auth: &AdminAuth,
    key: PlayerKey,
    amount: i64,
) -> Result<ProfileResponse, ServiceError> {
    require_non_negative("income per second", amount)?;
    apply(state, auth, key, PlayerChange::SetIncomePerSec(amount))
}

/// Reset a player's progress, businesses and casino statistics.
pub fn reset_player(
    state: &AppState,
    auth: &AdminAuth,
    key: PlayerKey,
) -> Result<ProfileResponse, ServiceError> {
    let player = state.store.reset_player(key)?;
    tracing::info!(admin = %auth.user_id, %key, "Player reset");
    Ok(ProfileResponse::new(&player, &state.config.pricing))
}

fn apply(
    state: &AppState,
    auth: &AdminAuth,
    key: PlayerKey,
    change: PlayerChange,
) -> Result<ProfileResponse, ServiceError> {
    let player = state.store.update_player(key, change)?;
    tracing::info!(admin = %auth.user_id, %key, ?change, "Player edited");
    Ok(ProfileResponse::new(&player, &state.config.pricing))
}

fn require_non_negative(what: &str, value: i64) -> Result<(), ServiceError> {
    if value < 0 {
        Err(ServiceError::BadRequest(format!("{what} cannot be negative")))
    } else {
        Ok(())
    }
}
