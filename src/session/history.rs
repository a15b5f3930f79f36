//! Undo history: a stack of prior snapshots.
//!
//! Snapshots share structure with each other through `im`, so keeping many
//! of them is cheap. Growth is unbounded unless a limit is configured; with a
//! limit, the oldest snapshot is dropped first.

use im::Vector;

use crate::core::GameState;

/// Undo stack of prior game states.
#[derive(Clone, Debug, Default)]
pub struct History {
    snapshots: Vector<GameState>,
    limit: Option<usize>,
}

impl History {
    /// Create an empty history.
    #[must_use]
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            snapshots: Vector::new(),
            limit,
        }
    }

    /// Record the state a transition started from.
    pub fn push(&mut self, state: GameState) {
        if self.limit == Some(0) {
            return;
        }
        self.snapshots.push_back(state);
        if let Some(limit) = self.limit {
            while self.snapshots.len() > limit {
                self.snapshots.pop_front();
            }
        }
    }

    /// Take the most recent snapshot.
    pub fn pop(&mut self) -> Option<GameState> {
        self.snapshots.pop_back()
    }

    /// Most recent snapshot without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&GameState> {
        self.snapshots.last()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
