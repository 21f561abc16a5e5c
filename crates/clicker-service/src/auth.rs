//! Admin authorization.

use clicker_core::UserId;
use clicker_store::Store;

use crate::error::ServiceError;
use crate::state::AppState;

/// A caller that passed the admin check.
///
/// Admin handlers take this as proof of authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminAuth {
    /// The authorized user.
    pub user_id: UserId,
    /// Whether the user is the configured owner.
    pub is_owner: bool,
}

impl AdminAuth {
    /// Authorize a caller as owner or roster admin.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Forbidden` if the caller is neither.
    pub fn authorize(state: &AppState, user_id: UserId) -> Result<Self, ServiceError> {
        if is_owner(state, user_id) {
            return Ok(Self {
                user_id,
                is_owner: true,
            });
        }
        if state.store.list_admins()?.contains(&user_id) {
            return Ok(Self {
                user_id,
                is_owner: false,
            });
        }
        tracing::debug!(%user_id, "Admin check failed");
        Err(ServiceError::Forbidden)
    }

    /// Authorize a caller as the owner.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Forbidden` if no owner is configured or the
    /// caller is someone else.
    pub fn authorize_owner(state: &AppState, user_id: UserId) -> Result<Self, ServiceError> {
        if is_owner(state, user_id) {
            Ok(Self {
                user_id,
                is_owner: true,
            })
        } else {
            Err(ServiceError::Forbidden)
        }
    }
}

/// Whether the user is the owner or on the admin roster.
///
/// # Errors
///
/// Returns an error if the roster cannot be read.
pub fn is_authorized(state: &AppState, user_id: UserId) -> Result<bool, ServiceError> {
    match AdminAuth::authorize(state, user_id) {
        Ok(_) => Ok(true),
        Err(ServiceError::Forbidden) => Ok(false),
        Err(err) => Err(err),
    }
}

fn is_owner(state: &AppState, user_id: UserId) -> bool {
    state.config.owner_id == Some(user_id)
}
