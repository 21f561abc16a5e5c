//! The milk jar: a four-step progress mini-game.
//!
//! Each fill adds 25 %. A full jar counts as completed once; emptying it
//! starts over but keeps the lifetime total.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{PlayerKey, ServerId, UserId};

/// Progress added by one fill, in percent.
pub const JAR_STEP: u8 = 25;

/// Progress of a full jar, in percent.
pub const JAR_CAPACITY: u8 = 100;

/// Jar progress of one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JarProgress {
    /// The user.
    pub user_id: UserId,
    /// The server.
    pub server_id: ServerId,
    /// Fill level in percent: 0, 25, 50, 75 or 100.
    #[serde(default)]
    pub progress: u8,
    /// Whether the current jar is full.
    #[serde(default)]
    pub completed: bool,
    /// When the current jar was filled.
    #[serde(default, with = "crate::timestamp::option")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Jars filled over the player's lifetime.
    #[serde(default)]
    pub total_completed: u64,
    /// When the current jar was started.
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl JarProgress {
    /// An empty jar.
    #[must_use]
    pub fn new(key: PlayerKey, now: DateTime<Utc>) -> Self {
        Self {
            user_id: key.user_id,
            server_id: key.server_id,
            progress: 0,
            completed: false,
            completed_at: None,
            total_completed: 0,
            created_at: now,
        }
    }

    /// Add one step. Returns the new progress.
    ///
    /// Filling a full jar does nothing.
    pub fn fill(&mut self, now: DateTime<Utc>) -> u8 {
        if self.completed {
            return self.progress;
        }
        self.progress = self.progress.saturating_add(JAR_STEP).min(JAR_CAPACITY);
        if self.progress == JAR_CAPACITY {
            self.completed = true;
            self.completed_at = Some(now);
            self.total_completed += 1;
        }
        self.progress
    }

    /// Start a new jar, keeping the lifetime total.
    pub fn empty(&mut self, now: DateTime<Utc>) {
        self.progress = 0;
        self.completed = false;
        self.completed_at = None;
        self.created_at = now;
    }

    /// Number of filled steps (0 to 4).
    #[must_use]
    pub const fn filled_steps(&self) -> u8 {
        self.progress / JAR_STEP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_fills_complete_the_jar() {
        let now = Utc::now();
        let mut jar = JarProgress::new(PlayerKey::new(1, 2), now);

        assert_eq!(jar.fill(now), 25);
        assert_eq!(jar.fill(now), 50);
        assert_eq!(jar.fill(now), 75);
        assert!(!jar.completed);
        assert_eq!(jar.fill(now), 100);
        assert!(jar.completed);
        assert_eq!(jar.total_completed, 1);
        assert_eq!(jar.filled_steps(), 4);
    }

    #[test]
    fn filling_a_full_jar_does_not_recount() {
        let now = Utc::now();
        let mut jar = JarProgress::new(PlayerKey::new(1, 2), now);
        for _ in 0..6 {
            jar.fill(now);
        }
        assert_eq!(jar.progress, 100);
        assert_eq!(jar.total_completed, 1);
    }

    #[test]
    fn empty_keeps_total() {
        let now = Utc::now();
        let mut jar = JarProgress::new(PlayerKey::new(1, 2), now);
        for _ in 0..4 {
            jar.fill(now);
        }
        jar.empty(now);
        assert_eq!(jar.progress, 0);
        assert!(!jar.completed);
        assert_eq!(jar.total_completed, 1);

        for _ in 0..4 {
            jar.fill(now);
        }
        assert_eq!(jar.total_completed, 2);
    }
}
