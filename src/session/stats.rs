//! Session statistics and their best-effort persistence.
//!
//! Statistics are loaded once at startup. An absent or unreadable blob
//! yields zeroed defaults; a failed write is reported to the caller, who
//! logs it and carries on.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::StoreError;
use super::storage::KeyValueStore;

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// One entry of the recent-games log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub outcome: Outcome,
    /// Elapsed seconds.
    pub time_secs: u64,
    pub moves: u32,
    pub timestamp: DateTime<Utc>,
}

/// Cumulative statistics across games.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Finished games (won or lost).
    pub games_played: u32,

    pub wins: u32,

    /// Consecutive wins; reset by a loss.
    pub current_streak: u32,

    /// Fastest win in seconds.
    pub best_time: Option<u64>,

    /// Fewest moves in a win.
    pub least_moves: Option<u32>,

    /// Most recent games first.
    pub recent: Vector<GameRecord>,
}

impl Statistics {
    /// Create zeroed statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a win.
    pub fn record_win(&mut self, time_secs: u64, moves: u32, at: DateTime<Utc>, capacity: usize) {
        self.games_played += 1;
        self.wins += 1;
        self.current_streak += 1;
        self.best_time = Some(self.best_time.map_or(time_secs, |best| best.min(time_secs)));
        self.least_moves = Some(self.least_moves.map_or(moves, |least| least.min(moves)));
        self.push_record(
            GameRecord {
                outcome: Outcome::Won,
                time_secs,
                moves,
                timestamp: at,
            },
            capacity,
        );
    }

    /// Record a game finished without winning.
    pub fn record_loss(&mut self, time_secs: u64, moves: u32, at: DateTime<Utc>, capacity: usize) {
        self.games_played += 1;
        self.current_streak = 0;
        self.push_record(
            GameRecord {
                outcome: Outcome::Lost,
                time_secs,
                moves,
                timestamp: at,
            },
            capacity,
        );
    }

    fn push_record(&mut self, record: GameRecord, capacity: usize) {
        self.recent.push_front(record);
        self.recent.truncate(capacity);
    }

    /// Fraction of finished games won (0.0 with no games).
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.wins as f64 / self.games_played as f64
        }
    }

    // === Persistence ===

    /// Encode as an opaque blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from a blob.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Load from `store`, falling back to defaults on absence or corruption.
    #[must_use]
    pub fn load(store: &impl KeyValueStore, key: &str) -> Self {
        match store.get(key) {
            Ok(Some(bytes)) => match Self::from_bytes(&bytes) {
                Ok(stats) => {
                    debug!(games = stats.games_played, wins = stats.wins, "Loaded statistics");
                    stats
                }
                Err(e) => {
                    warn!(error = %e, key, "Stored statistics unreadable, using defaults");
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                warn!(error = %e, key, "Statistics read failed, using defaults");
                Self::default()
            }
        }
    }

    /// Overwrite the stored blob.
    pub fn save(&self, store: &mut impl KeyValueStore, key: &str) -> Result<(), StoreError> {
        store.set(key, self.to_bytes()?)
    }
}
