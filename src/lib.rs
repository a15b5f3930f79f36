//! # freecell-engine
//!
//! Move validation and game state for FreeCell solitaire.
//!
//! ## Design Principles
//!
//! 1. **Pure Rules**: Validation, execution and autoplay are functions of
//!    `&GameState`. They never mutate their input.
//!
//! 2. **Snapshots Are Values**: Every transition produces a new `GameState`.
//!    Persistent vectors (`im-rs`) make clones O(1), so undo history is cheap
//!    and no two snapshots alias.
//!
//! 3. **Host-Driven Time**: Autoplay and the game clock are deadlines that
//!    fire when the host calls `Controller::advance`. Nothing here sleeps
//!    or spawns.
//!
//! ## Modules
//!
//! - `core`: Cards, deck, RNG, game state, configuration
//! - `zones`: Zone addresses and moves
//! - `rules`: Validator, executor, autoplay
//! - `session`: Controller, history, statistics, drag, external ports

pub mod core;
pub mod rules;
pub mod session;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    create_deck, deal, Card, Color, EngineConfig, GameRng, GameState, LoadError, Rank, StateError,
    Suit,
};

pub use crate::zones::{Move, Source, Zone, ZoneAddress, ZoneKind};

pub use crate::rules::{
    apply_move, autoplay_step, is_legal, is_safe_autoplay, legal_moves, max_move_size,
    supermove_capacity, validate, InvalidMove,
};

pub use crate::session::{
    Clipboard, Controller, DragOutcome, GameStatus, KeyValueStore, MemoryClipboard, MemoryStore,
    Statistics, SyncOutcome,
};
