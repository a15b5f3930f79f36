//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default statistics storage key.
pub const DEFAULT_STATS_KEY: &str = "freecell-stats";

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Send safe cards to foundations automatically.
    /// Checked before every scan, so it can be toggled mid-game.
    pub autoplay_enabled: bool,

    /// Debounce between a state change and the next autoplay scan.
    /// Tunable for animation settling; does not affect correctness.
    pub autoplay_delay: Duration,

    /// Pointer travel (pixels, either axis) before a press becomes a drag.
    pub drag_threshold: f32,

    /// Maximum undo snapshots kept (`None` = unlimited).
    /// When full, the oldest snapshot is dropped.
    pub history_limit: Option<usize>,

    /// Entries kept in the recent-games log.
    pub recent_games_capacity: usize,

    /// Key under which statistics are persisted.
    pub stats_key: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            autoplay_enabled: true,
            autoplay_delay: Duration::from_millis(200),
            drag_threshold: 5.0,
            history_limit: None,
            recent_games_capacity: 50,
            stats_key: DEFAULT_STATS_KEY.to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with autoplay on or off.
    pub fn with_autoplay(mut self, enabled: bool) -> Self {
        self.autoplay_enabled = enabled;
        self
    }

    /// Create a new config with a custom autoplay delay.
    pub fn with_autoplay_delay(mut self, delay: Duration) -> Self {
        self.autoplay_delay = delay;
        self
    }

    /// Create a new config with a custom drag threshold.
    pub fn with_drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    /// Create a new config with a bounded undo history.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Create a new config with a custom recent-games capacity.
    pub fn with_recent_games_capacity(mut self, capacity: usize) -> Self {
        self.recent_games_capacity = capacity;
        self
    }

    /// Create a new config with a custom statistics key.
    pub fn with_stats_key(mut self, key: impl Into<String>) -> Self {
        self.stats_key = key.into();
        self
    }
}
