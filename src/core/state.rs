//! Game state: the aggregate of tableau, freecells and foundations.
//!
//! ## GameState
//!
//! - 8 tableau columns, index 0 = buried, last = exposed
//! - 4 freecells, each empty or holding one card
//! - 4 foundations, one per suit, built Ace to King
//! - Move counter
//!
//! Uses `im` persistent vectors so a snapshot clone is O(1) and shares no
//! mutable storage with the state it was cloned from. The undo history
//! keeps old snapshots alive while new ones are derived from them.
//!
//! ## Text form
//!
//! `to_json` / `from_json` use a structured JSON encoding of the full
//! aggregate. Foundations are keyed by suit name:
//!
//! ```text
//! {"columns":[[{"rank":13,"suit":"spades"}, ..], ..],
//!  "freecells":[null,null,null,null],
//!  "foundations":{"spades":[],"hearts":[],"clubs":[],"diamonds":[]},
//!  "moves":0}
//! ```

use std::ops::{Index, IndexMut};

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};
use super::error::{LoadError, StateError};

/// Number of tableau columns.
pub const COLUMN_COUNT: usize = 8;

/// Number of freecell slots.
pub const FREECELL_COUNT: usize = 4;

/// Cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// A single tableau column, bottom to top.
pub type Column = Vector<Card>;

/// Per-suit foundation piles, indexable by `Suit`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Foundations {
    pub spades: Vector<Card>,
    pub hearts: Vector<Card>,
    pub clubs: Vector<Card>,
    pub diamonds: Vector<Card>,
}

impl Foundations {
    /// Iterate over `(suit, pile)` in canonical suit order.
    pub fn iter(&self) -> impl Iterator<Item = (Suit, &Vector<Card>)> {
        Suit::ALL.into_iter().map(move |suit| (suit, &self[suit]))
    }

    /// Total cards across all four piles.
    #[must_use]
    pub fn total(&self) -> usize {
        self.iter().map(|(_, pile)| pile.len()).sum()
    }
}

impl Index<Suit> for Foundations {
    type Output = Vector<Card>;

    fn index(&self, suit: Suit) -> &Self::Output {
        match suit {
            Suit::Spades => &self.spades,
            Suit::Hearts => &self.hearts,
            Suit::Clubs => &self.clubs,
            Suit::Diamonds => &self.diamonds,
        }
    }
}

impl IndexMut<Suit> for Foundations {
    fn index_mut(&mut self, suit: Suit) -> &mut Self::Output {
        match suit {
            Suit::Spades => &mut self.spades,
            Suit::Hearts => &mut self.hearts,
            Suit::Clubs => &mut self.clubs,
            Suit::Diamonds => &mut self.diamonds,
        }
    }
}

/// Complete FreeCell position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    /// Tableau columns.
    pub columns: [Column; COLUMN_COUNT],

    /// Freecell slots.
    pub freecells: [Option<Card>; FREECELL_COUNT],

    /// Foundation piles.
    pub foundations: Foundations,

    /// Successful moves applied so far.
    #[serde(default)]
    pub moves: u32,
}

impl GameState {
    /// Create an empty state (no cards anywhere).
    ///
    /// Useful as a fixture base; not a legal position on its own.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    // === Columns ===

    /// Get a column by index.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Exposed card of a column.
    #[must_use]
    pub fn column_top(&self, index: usize) -> Option<Card> {
        self.column(index).and_then(|col| col.last().copied())
    }

    /// Number of empty columns.
    #[must_use]
    pub fn empty_columns(&self) -> usize {
        self.columns.iter().filter(|col| col.is_empty()).count()
    }

    // === Freecells ===

    /// Card in a freecell slot.
    #[must_use]
    pub fn freecell(&self, index: usize) -> Option<Card> {
        self.freecells.get(index).copied().flatten()
    }

    /// Number of empty freecell slots.
    #[must_use]
    pub fn empty_freecells(&self) -> usize {
        self.freecells.iter().filter(|slot| slot.is_none()).count()
    }

    /// First empty freecell slot, if any.
    #[must_use]
    pub fn first_empty_freecell(&self) -> Option<usize> {
        self.freecells.iter().position(Option::is_none)
    }

    // === Foundations ===

    /// Foundation pile for a suit.
    #[must_use]
    pub fn foundation(&self, suit: Suit) -> &Vector<Card> {
        &self.foundations[suit]
    }

    /// Highest rank on a foundation, 0 when empty.
    ///
    /// Pile length equals the top rank because piles are built in sequence.
    #[must_use]
    pub fn foundation_rank(&self, suit: Suit) -> u8 {
        self.foundations[suit].len() as u8
    }

    /// Cards on all foundations.
    #[must_use]
    pub fn foundation_count(&self) -> usize {
        self.foundations.total()
    }

    /// True when all 52 cards are on foundations.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.foundation_count() == DECK_SIZE
    }

    // === Invariants ===

    /// Iterate over every card in every zone.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        let columns = self.columns.iter().flat_map(|col| col.iter().copied());
        let cells = self.freecells.iter().filter_map(|slot| *slot);
        let foundations = self.foundations.iter().flat_map(|(_, pile)| pile.iter().copied());
        columns.chain(cells).chain(foundations)
    }

    /// Check that the state holds exactly one deck and well-formed foundations.
    pub fn check_invariants(&self) -> Result<(), StateError> {
        let mut seen = FxHashSet::default();
        for card in self.cards() {
            if !seen.insert(card) {
                return Err(StateError::Duplicate { card });
            }
        }
        if seen.len() != DECK_SIZE {
            return Err(StateError::CardCount { found: seen.len() });
        }

        for (suit, pile) in self.foundations.iter() {
            let in_sequence = pile
                .iter()
                .zip(Rank::all())
                .all(|(card, rank)| card.suit == suit && card.rank == rank);
            if !in_sequence {
                return Err(StateError::FoundationOutOfSequence { suit });
            }
        }

        Ok(())
    }

    // === Text form ===

    /// Encode the full state as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a state from JSON and check its invariants.
    ///
    /// Fails with `LoadError::Malformed` if any of `columns`, `freecells`
    /// or `foundations` is missing or mistyped.
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        let state: GameState = serde_json::from_str(text)?;
        state.check_invariants()?;
        Ok(state)
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cells:")?;
        for slot in &self.freecells {
            match slot {
                Some(card) => write!(f, " {card}")?,
                None => write!(f, " --")?,
            }
        }
        write!(f, " | found:")?;
        for (suit, pile) in self.foundations.iter() {
            match pile.last() {
                Some(card) => write!(f, " {card}")?,
                None => write!(f, " -{suit}")?,
            }
        }
        writeln!(f)?;
        for (i, col) in self.columns.iter().enumerate() {
            write!(f, "{i}:")?;
            for card in col {
                write!(f, " {card}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
