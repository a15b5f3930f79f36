//! Core types: cards, deck, RNG, game state, configuration.
//!
//! Everything here is pure data plus constructors. Move legality lives in
//! `rules`; session bookkeeping lives in `session`.

pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod rng;
pub mod state;

pub use card::{Card, CardId, Color, Rank, Suit};
#[cfg(test)]
pub(crate) use card::card;
pub use config::{EngineConfig, DEFAULT_STATS_KEY};
pub use deck::{create_deck, deal, deal_from_order, shuffle};
pub use error::{LoadError, StateError};
pub use rng::GameRng;
pub use state::{Column, Foundations, GameState, COLUMN_COUNT, DECK_SIZE, FREECELL_COUNT};
