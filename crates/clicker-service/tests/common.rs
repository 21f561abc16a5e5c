//! Common test utilities for clicker integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use tempfile::TempDir;

use clicker_core::{PlayerKey, UserId};
use clicker_service::{AdminAuth, AppState, ServiceConfig};
use clicker_store::{JsonStore, PlayerChange, Store};

/// Owner configured for every harness.
pub const OWNER: u64 = 1_000;

/// Server the test players live on.
pub const SERVER: u64 = 42;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// Shared application state.
    pub state: AppState,
    /// Temporary data directory (kept alive for test duration).
    pub temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with an empty data directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = JsonStore::open(temp_dir.path()).expect("Failed to open store");

        let config = ServiceConfig {
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            owner_id: Some(UserId::new(OWNER)),
            ..ServiceConfig::default()
        };

        Self {
            state: AppState::new(Arc::new(store), config),
            temp_dir,
        }
    }

    /// Key of a test player on the test server.
    pub fn key(user: u64) -> PlayerKey {
        PlayerKey::new(user, SERVER)
    }

    /// Register a player and give them `coins`.
    pub fn funded_player(&self, user: u64, coins: i64) -> PlayerKey {
        let key = Self::key(user);
        self.state
            .store
            .create_player(key, chrono::Utc::now())
            .expect("Failed to create player");
        self.state
            .store
            .update_player(key, PlayerChange::SetMoney(coins))
            .expect("Failed to fund player");
        key
    }

    /// Authorization of the owner.
    pub fn owner(&self) -> AdminAuth {
        AdminAuth::authorize(&self.state, UserId::new(OWNER)).expect("Owner must authorize")
    }

    /// Re-open the data directory as a fresh store.
    pub fn reopen(&self) -> JsonStore {
        JsonStore::open(self.temp_dir.path()).expect("Failed to reopen store")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
