//! Error types for the clicker economy.

use crate::ids::IdError;
use crate::money::Money;

/// Result type for economy rules.
pub type Result<T> = std::result::Result<T, EconomyError>;

/// Reasons an economy rule can reject an action.
///
/// These are expected outcomes of player actions, not faults. The store
/// wraps them unchanged so callers can tell the player what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EconomyError {
    /// Not enough money for the operation.
    #[error("insufficient funds: balance={balance}, required={required}")]
    InsufficientFunds {
        /// Current balance.
        balance: Money,
        /// Amount the operation needs.
        required: Money,
    },

    /// The player clicked again before the cooldown elapsed.
    #[error("click cooldown active: {remaining_ms}ms remaining")]
    ClickCooldown {
        /// Milliseconds until the next click is accepted.
        remaining_ms: i64,
    },

    /// No business with this catalog number.
    #[error("unknown business #{number}")]
    UnknownBusiness {
        /// The 1-based catalog number that was requested.
        number: usize,
    },

    /// Bet below the casino minimum.
    #[error("bet {bet} is below the minimum of {minimum}")]
    BetTooSmall {
        /// The requested bet in coins.
        bet: i64,
        /// Minimum allowed bet in coins.
        minimum: i64,
    },

    /// Multiplier not offered by the casino.
    #[error("unsupported multiplier x{0}")]
    UnsupportedMultiplier(u32),

    /// A casino step was taken out of order.
    #[error("cannot {action} while in state {state}")]
    InvalidTransition {
        /// The state the play was in.
        state: &'static str,
        /// The action that was attempted.
        action: &'static str,
    },

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidKey(#[from] IdError),
}
