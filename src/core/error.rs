//! State validation and import errors.

use derive_more::{Display, Error, From};

use super::card::{Card, Suit};

/// A candidate state breaks a structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum StateError {
    /// Not exactly one full deck across all zones.
    #[display("expected 52 cards, found {found}")]
    CardCount { found: usize },

    /// The same card appears in more than one place.
    #[display("duplicate card {card}")]
    Duplicate { card: Card },

    /// A foundation pile is not `A, 2, 3, ..` of its own suit.
    #[display("{suit} foundation is out of sequence")]
    FoundationOutOfSequence { suit: Suit },
}

/// Imported text could not be adopted as a game state.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum LoadError {
    /// Not parseable, or missing one of `columns`, `freecells`, `foundations`.
    #[display("malformed game state: {message}")]
    #[from(ignore)]
    Malformed { message: String },

    /// Parsed, but violates a state invariant.
    #[display("invalid game state: {_0}")]
    Invalid(StateError),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Malformed {
            message: err.to_string(),
        }
    }
}
