//! Persisted document definitions.
//!
//! Each domain is one JSON document. The shapes keep the top-level wrapper
//! objects (`users`, `businesses`, `players`) of the documents the bot has
//! always written.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use clicker_core::{CasinoStats, JarProgress, PlayerKey, PlayerRecord, Portfolio, UserId};

/// The persisted domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Player records.
    Ledger,
    /// Business portfolios.
    Businesses,
    /// Casino statistics.
    Casino,
    /// Milk jars.
    Jars,
    /// Admin roster.
    Admins,
}

impl Domain {
    /// File name of the domain's document.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Ledger => "game_data.json",
            Self::Businesses => "business_data.json",
            Self::Casino => "casino_data.json",
            Self::Jars => "banka_data.json",
            Self::Admins => "admins.json",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ledger => "ledger",
            Self::Businesses => "businesses",
            Self::Casino => "casino",
            Self::Jars => "jars",
            Self::Admins => "admins",
        };
        f.write_str(name)
    }
}

/// Returns all domains in flush order.
#[must_use]
pub fn all_domains() -> Vec<Domain> {
    vec![
        Domain::Ledger,
        Domain::Businesses,
        Domain::Casino,
        Domain::Jars,
        Domain::Admins,
    ]
}

/// `game_data.json`: `{"users": {"<user>-<server>": PlayerRecord}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerDocument {
    /// Player records.
    #[serde(default)]
    pub users: BTreeMap<PlayerKey, PlayerRecord>,
}

/// `business_data.json`: `{"businesses": {"<user>-<server>": Portfolio}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessDocument {
    /// Portfolios.
    #[serde(default)]
    pub businesses: BTreeMap<PlayerKey, Portfolio>,
}

/// `casino_data.json`: `{"players": {"<user>-<server>": CasinoStats}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CasinoDocument {
    /// Casino statistics.
    #[serde(default)]
    pub players: BTreeMap<PlayerKey, CasinoStats>,
}

/// `banka_data.json`: a flat map of jars.
pub type JarDocument = BTreeMap<PlayerKey, JarProgress>;

/// `admins.json`: an array of user ids.
pub type AdminDocument = BTreeSet<UserId>;
