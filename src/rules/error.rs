//! Move rejection reasons.
//!
//! A rejected move changes nothing. Callers that only need a yes/no can use
//! `rules::is_legal`; the variant is there for logging and tests.

use derive_more::{Display, Error};

use crate::core::{Card, Suit};
use crate::zones::{Source, Zone};

/// Why a proposed move is illegal.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InvalidMove {
    /// The game is already won; no further moves apply.
    #[display("game is over")]
    GameOver,

    /// Source index or depth does not exist.
    #[display("no such source: {from}")]
    NoSuchSource { from: Source },

    /// Destination index does not exist.
    #[display("no such destination: {to}")]
    NoSuchDestination { to: Zone },

    /// Nothing to pick up at the source.
    #[display("{from} is empty")]
    EmptySource { from: Source },

    /// Source and destination are the same zone.
    #[display("cannot move {from} onto itself")]
    SameZone { from: Source },

    /// The picked-up suffix is not a descending alternating-color run.
    #[display("{from} is not a movable run")]
    NotARun { from: Source },

    /// Freecells and foundations accept exactly one card.
    #[display("{to} takes one card, not {count}")]
    TooManyCards { to: Zone, count: usize },

    /// Destination freecell already holds a card.
    #[display("cell {index} is occupied")]
    FreecellOccupied { index: usize },

    /// Card does not belong on this foundation.
    #[display("{card} does not belong on the {suit} foundation")]
    WrongSuit { card: Card, suit: Suit },

    /// Card is not the next rank for its foundation.
    #[display("{card} is out of sequence for its foundation")]
    OutOfSequence { card: Card },

    /// Card cannot sit on the destination column's top card.
    #[display("{card} cannot go on {onto}")]
    CannotStack { card: Card, onto: Card },

    /// Run is longer than free cells and empty columns allow.
    #[display("run of {count} exceeds capacity {capacity}")]
    ExceedsCapacity { count: usize, capacity: usize },
}
