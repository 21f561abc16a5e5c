//! Service error types.

use serde::Serialize;

use clicker_core::{EconomyError, Money};
use clicker_store::StoreError;

/// Service error type.
///
/// Each variant is a category the front end renders differently; the
/// message carries the detail.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Forbidden - the caller lacks admin rights.
    #[error("forbidden")]
    Forbidden,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict - resource already exists or invalid state transition.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Not enough money.
    #[error("insufficient funds: balance={balance}, required={required}")]
    InsufficientFunds {
        /// Current balance.
        balance: Money,
        /// Required amount.
        required: Money,
    },

    /// Clicked too soon.
    #[error("click cooldown: {remaining_ms}ms remaining")]
    Cooldown {
        /// Milliseconds until the next click is accepted.
        remaining_ms: i64,
    },

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Serializable error body for front ends.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl ServiceError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Forbidden => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::Conflict(_) => "conflict",
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::Cooldown { .. } => "cooldown",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Error body safe to show to a player. Internal details are hidden.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        let message = match self {
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };
        ErrorBody {
            code: self.code(),
            message,
        }
    }
}

impl From<EconomyError> for ServiceError {
    fn from(err: EconomyError) -> Self {
        match err {
            EconomyError::InsufficientFunds { balance, required } => {
                Self::InsufficientFunds { balance, required }
            }
            EconomyError::ClickCooldown { remaining_ms } => Self::Cooldown { remaining_ms },
            EconomyError::InvalidTransition { .. } => Self::Conflict(err.to_string()),
            EconomyError::UnknownBusiness { .. }
            | EconomyError::BetTooSmall { .. }
            | EconomyError::UnsupportedMultiplier(_)
            | EconomyError::InvalidKey(_) => Self::BadRequest(err.to_string()),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PlayerNotFound { key } => Self::NotFound(format!("player {key}")),
            StoreError::PlayerAlreadyExists { key } => {
                Self::Conflict(format!("player {key} already exists"))
            }
            StoreError::Rejected(rejection) => rejection.into(),
            StoreError::Io { .. } | StoreError::Serialization(_) | StoreError::LockPoisoned => {
                Self::Internal(err.to_string())
            }
        }
    }
}
