//! Identifier types for the clicker economy.
//!
//! Chat platforms hand us numeric snowflake ids for users and servers. A
//! player's state is scoped to one server, so the pair forms the composite
//! [`PlayerKey`] used by every store domain.
//!
//! # Key format
//!
//! On disk a key is written as `"{user_id}-{server_id}"`. Older documents
//! used `"{user_id}_{server_id}"` for some domains, so parsing accepts either
//! delimiter and writing always uses `-`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Delimiter used when writing keys.
pub const KEY_DELIMITER: char = '-';

/// Delimiter accepted for backwards compatibility.
pub const LEGACY_KEY_DELIMITER: char = '_';

/// Errors from parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The value is not an unsigned integer.
    #[error("invalid numeric id: {0:?}")]
    InvalidNumber(String),

    /// The composite key has no delimiter.
    #[error("player key {0:?} has no delimiter")]
    MissingDelimiter(String),
}

/// Macro to define a numeric snowflake identifier with standard trait implementations.
///
/// This macro generates a newtype wrapper around `u64` with implementations for:
/// - `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `Serialize`, `Deserialize` (as a JSON number)
/// - `FromStr`, `Display`, `Debug`
/// - `From<u64>`
macro_rules! snowflake_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create an identifier from its raw value.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the raw value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| IdError::InvalidNumber(s.to_string()))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

snowflake_id_type!(UserId, "A chat user identifier.");
snowflake_id_type!(ServerId, "A chat server (guild) identifier.");

/// The composite identity of a player: one user on one server.
///
/// Serialized as a string so it can be used as a JSON object key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerKey {
    /// The user.
    pub user_id: UserId,
    /// The server the user plays on.
    pub server_id: ServerId,
}

impl PlayerKey {
    /// Create a key from raw ids.
    #[must_use]
    pub const fn new(user_id: u64, server_id: u64) -> Self {
        Self {
            user_id: UserId::new(user_id),
            server_id: ServerId::new(server_id),
        }
    }
}

impl FromStr for PlayerKey {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (user, server) = s
            .split_once(|c| c == KEY_DELIMITER || c == LEGACY_KEY_DELIMITER)
            .ok_or_else(|| IdError::MissingDelimiter(s.to_string()))?;
        Ok(Self {
            user_id: user.parse()?,
            server_id: server.parse()?,
        })
    }
}

impl fmt::Debug for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerKey({self})")
    }
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{KEY_DELIMITER}{}", self.user_id, self.server_id)
    }
}

impl TryFrom<String> for PlayerKey {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlayerKey> for String {
    fn from(key: PlayerKey) -> Self {
        key.to_string()
    }
}
