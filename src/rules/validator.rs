//! Move validation: pure predicates over a `GameState`.
//!
//! ## Rules
//!
//! - **Run**: a column suffix moves as a unit only if each card is one rank
//!   lower than, and the opposite color of, the card beneath it.
//! - **Column**: the run's base card goes on an empty column, or on a top
//!   card of the opposite color exactly one rank higher.
//! - **Freecell**: one card, into an empty slot.
//! - **Foundation**: one card, onto its own suit's pile, Ace first then
//!   strictly ascending.
//! - **Supermove capacity**: a run of `L` cards onto a column needs
//!   `L <= (empty_freecells + 1) * 2^effective_empty_columns`, where an empty
//!   destination column does not count as transit space.
//!
//! Nothing here mutates state; see `executor` for applying a move.

use im::Vector;
use smallvec::SmallVec;

use crate::core::{Card, Column, GameState, Rank, Suit};
use crate::zones::{Move, Source, Zone};

use super::error::InvalidMove;

/// Cards picked up by a move, base card first.
///
/// A valid run never exceeds 13 cards (King down to Ace).
pub type Run = SmallVec<[Card; 13]>;

// === Run validity ===

/// Is this sequence (base first) a descending alternating-color run?
///
/// Empty and single-card sequences are trivially valid.
#[must_use]
pub fn is_valid_run(cards: &[Card]) -> bool {
    cards.windows(2).all(|pair| pair[1].stacks_on(pair[0]))
}

/// Can the suffix of `column` starting at `depth` move as a unit?
///
/// False when `depth` is past the top card.
#[must_use]
pub fn is_movable_run(column: &Column, depth: usize) -> bool {
    if depth >= column.len() {
        return false;
    }
    let suffix: Run = column.iter().skip(depth).copied().collect();
    is_valid_run(&suffix)
}

// === Placement ===

/// Can `card` (a run's base) be placed on `column`?
#[must_use]
pub fn can_place_on_column(card: Card, column: &Column) -> bool {
    match column.last() {
        None => true,
        Some(&top) => card.stacks_on(top),
    }
}

/// Can `card` go onto the foundation pile `pile` for `suit`?
#[must_use]
pub fn can_place_on_foundation(card: Card, suit: Suit, pile: &Vector<Card>) -> bool {
    if card.suit != suit {
        return false;
    }
    match pile.last() {
        None => card.rank == Rank::ACE,
        Some(top) => top.rank.next() == Some(card.rank),
    }
}

/// Can `card` go onto its own suit's foundation in `state`?
#[must_use]
pub fn can_move_to_foundation(state: &GameState, card: Card) -> bool {
    can_place_on_foundation(card, card.suit, state.foundation(card.suit))
}

// === Supermove ===

/// Largest run movable with the given transit space.
///
/// `(empty_freecells + 1) * 2^max(0, empty_columns - [destination_empty])`
#[must_use]
pub fn supermove_capacity(empty_freecells: usize, empty_columns: usize, destination_empty: bool) -> usize {
    let effective_columns = if destination_empty {
        empty_columns.saturating_sub(1)
    } else {
        empty_columns
    };
    (empty_freecells + 1) << effective_columns
}

/// Largest run movable onto a column in `state`.
#[must_use]
pub fn max_move_size(state: &GameState, destination_empty: bool) -> usize {
    supermove_capacity(state.empty_freecells(), state.empty_columns(), destination_empty)
}

// === Full validation ===

/// Cards that `source` would pick up, checked for run validity.
pub fn pick_up(state: &GameState, source: Source) -> Result<Run, InvalidMove> {
    match source {
        Source::Freecell(index) => {
            if index >= state.freecells.len() {
                return Err(InvalidMove::NoSuchSource { from: source });
            }
            let card = state
                .freecell(index)
                .ok_or(InvalidMove::EmptySource { from: source })?;
            Ok(SmallVec::from_slice(&[card]))
        }
        Source::Column { index, depth } => {
            let column = state
                .column(index)
                .ok_or(InvalidMove::NoSuchSource { from: source })?;
            if column.is_empty() {
                return Err(InvalidMove::EmptySource { from: source });
            }
            if depth >= column.len() {
                return Err(InvalidMove::NoSuchSource { from: source });
            }
            let run: Run = column.iter().skip(depth).copied().collect();
            if !is_valid_run(&run) {
                return Err(InvalidMove::NotARun { from: source });
            }
            Ok(run)
        }
    }
}

/// Check a move against every rule. Returns the cards it would move.
pub fn validate(state: &GameState, mv: Move) -> Result<Run, InvalidMove> {
    let run = pick_up(state, mv.from)?;
    if mv.from.zone() == mv.to {
        return Err(InvalidMove::SameZone { from: mv.from });
    }
    let base = run[0];

    match mv.to {
        Zone::Freecell(index) => {
            let slot = state
                .freecells
                .get(index)
                .ok_or(InvalidMove::NoSuchDestination { to: mv.to })?;
            if run.len() != 1 {
                return Err(InvalidMove::TooManyCards { to: mv.to, count: run.len() });
            }
            if slot.is_some() {
                return Err(InvalidMove::FreecellOccupied { index });
            }
        }
        Zone::Column(index) => {
            let column = state
                .column(index)
                .ok_or(InvalidMove::NoSuchDestination { to: mv.to })?;
            if let Some(&onto) = column.last() {
                if !base.stacks_on(onto) {
                    return Err(InvalidMove::CannotStack { card: base, onto });
                }
            }
            let capacity = max_move_size(state, column.is_empty());
            if run.len() > capacity {
                return Err(InvalidMove::ExceedsCapacity {
                    count: run.len(),
                    capacity,
                });
            }
        }
        Zone::Foundation(suit) => {
            if run.len() != 1 {
                return Err(InvalidMove::TooManyCards { to: mv.to, count: run.len() });
            }
            if base.suit != suit {
                return Err(InvalidMove::WrongSuit { card: base, suit });
            }
            if !can_place_on_foundation(base, suit, state.foundation(suit)) {
                return Err(InvalidMove::OutOfSequence { card: base });
            }
        }
    }

    Ok(run)
}

/// Is `mv` legal in `state`?
#[must_use]
pub fn is_legal(state: &GameState, mv: Move) -> bool {
    validate(state, mv).is_ok()
}
