//! Move execution: the pure state reducer.
//!
//! `apply_move(state, mv)` validates and returns a new snapshot. The input
//! snapshot is never modified, so callers can keep it (e.g. for undo).

use crate::core::{GameState, Suit, COLUMN_COUNT, FREECELL_COUNT};
use crate::zones::{Move, Source, Zone};

use super::error::InvalidMove;
use super::validator::{can_move_to_foundation, is_valid_run, validate};

/// Apply a move, producing the next state.
///
/// Increments the move counter by exactly one. Returns the rejection reason
/// and leaves `state` untouched if the move is illegal.
pub fn apply_move(state: &GameState, mv: Move) -> Result<GameState, InvalidMove> {
    let run = validate(state, mv)?;
    let base = run[0];

    let mut next = state.clone();

    match mv.from {
        Source::Freecell(index) => next.freecells[index] = None,
        Source::Column { index, depth } => next.columns[index].truncate(depth),
    }

    match mv.to {
        Zone::Freecell(index) => next.freecells[index] = Some(base),
        Zone::Column(index) => next.columns[index].extend(run),
        Zone::Foundation(suit) => next.foundations[suit].push_back(base),
    }

    next.moves += 1;
    Ok(next)
}

/// Every legal move in `state`.
///
/// Sources are freecells then column suffixes (shallowest run last);
/// destinations are foundations, then columns, then freecells.
#[must_use]
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    let mut sources = Vec::new();
    for cell in 0..FREECELL_COUNT {
        if state.freecell(cell).is_some() {
            sources.push(Source::Freecell(cell));
        }
    }
    for (index, column) in state.columns.iter().enumerate() {
        let cards: Vec<_> = column.iter().copied().collect();
        for depth in 0..cards.len() {
            if is_valid_run(&cards[depth..]) {
                sources.push(Source::Column { index, depth });
            }
        }
    }

    let destinations = Suit::ALL
        .into_iter()
        .map(Zone::Foundation)
        .chain((0..COLUMN_COUNT).map(Zone::Column))
        .chain((0..FREECELL_COUNT).map(Zone::Freecell));

    let destinations: Vec<_> = destinations.collect();
    let mut moves = Vec::new();
    for &from in &sources {
        for &to in &destinations {
            let mv = Move::new(from, to);
            if validate(state, mv).is_ok() {
                moves.push(mv);
            }
        }
    }
    moves
}

/// The one-gesture move for a card (double-click).
///
/// Only a freecell card or a column's top card qualifies. Prefers its
/// foundation; otherwise a column card goes to the first empty freecell.
#[must_use]
pub fn quick_move(state: &GameState, source: Source) -> Option<Move> {
    let card = match source {
        Source::Freecell(index) => state.freecell(index)?,
        Source::Column { index, depth } => {
            let column = state.column(index)?;
            if column.len().checked_sub(1) != Some(depth) {
                return None;
            }
            *column.last()?
        }
    };

    if can_move_to_foundation(state, card) {
        return Some(Move::new(source, Zone::Foundation(card.suit)));
    }

    match source {
        Source::Column { .. } => state
            .first_empty_freecell()
            .map(|cell| Move::new(source, Zone::Freecell(cell))),
        Source::Freecell(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{card, create_deck, deal_from_order, GameRng, deal};

    #[test]
    fn test_apply_column_to_freecell() {
        let state = deal_from_order(create_deck());
        let top = state.column_top(3).unwrap();
        let depth = state.columns[3].len() - 1;

        let next = apply_move(&state, Move::from_column(3, depth, Zone::Freecell(2))).unwrap();

        assert_eq!(next.freecell(2), Some(top));
        assert_eq!(next.columns[3].len(), depth);
        assert_eq!(next.moves, 1);
        // Input untouched
        assert_eq!(state.column_top(3), Some(top));
        assert_eq!(state.freecell(2), None);
        assert_eq!(state.moves, 0);
    }

    #[test]
    fn test_apply_run_to_column() {
        let mut state = GameState::empty();
        state.columns[0].push_back(card(13, Suit::Clubs));
        state.columns[0].push_back(card(9, Suit::Hearts));
        state.columns[0].push_back(card(8, Suit::Spades));
        state.columns[1].push_back(card(10, Suit::Spades));

        let next = apply_move(&state, Move::from_column(0, 1, Zone::Column(1))).unwrap();

        let col1: Vec<_> = next.columns[1].iter().copied().collect();
        assert_eq!(col1, vec![card(10, Suit::Spades), card(9, Suit::Hearts), card(8, Suit::Spades)]);
        assert_eq!(next.columns[0].len(), 1);
    }

    #[test]
    fn test_apply_to_foundation() {
        let mut state = GameState::empty();
        state.freecells[3] = Some(card(1, Suit::Diamonds));

        let next = apply_move(&state, Move::from_freecell(3, Zone::Foundation(Suit::Diamonds))).unwrap();
        assert_eq!(next.foundation_rank(Suit::Diamonds), 1);
        assert_eq!(next.freecell(3), None);
    }

    #[test]
    fn test_apply_rejected_leaves_state() {
        let state = deal_from_order(create_deck());
        let before = state.clone();
        let result = apply_move(&state, Move::from_column(0, 0, Zone::Freecell(0)));
        assert!(result.is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_legal_moves_are_legal() {
        let state = deal(&mut GameRng::new(5));
        let moves = legal_moves(&state);
        assert!(!moves.is_empty());
        for mv in moves {
            let next = apply_move(&state, mv).unwrap();
            assert!(next.check_invariants().is_ok());
        }
    }

    #[test]
    fn test_legal_moves_fresh_deal_includes_every_freecell() {
        let state = deal(&mut GameRng::new(11));
        let moves = legal_moves(&state);
        for col in 0..COLUMN_COUNT {
            let depth = state.columns[col].len() - 1;
            for cell in 0..FREECELL_COUNT {
                assert!(moves.contains(&Move::from_column(col, depth, Zone::Freecell(cell))));
            }
        }
    }

    #[test]
    fn test_quick_move_prefers_foundation() {
        let mut state = GameState::empty();
        state.columns[0].push_back(card(5, Suit::Clubs));
        state.columns[0].push_back(card(1, Suit::Hearts));

        let mv = quick_move(&state, Source::Column { index: 0, depth: 1 });
        assert_eq!(mv, Some(Move::from_column(0, 1, Zone::Foundation(Suit::Hearts))));
    }

    #[test]
    fn test_quick_move_falls_back_to_freecell() {
        let mut state = GameState::empty();
        state.columns[0].push_back(card(5, Suit::Clubs));
        state.freecells[0] = Some(card(9, Suit::Hearts));

        let mv = quick_move(&state, Source::Column { index: 0, depth: 0 });
        assert_eq!(mv, Some(Move::from_column(0, 0, Zone::Freecell(1))));

        // Freecell cards only go to foundations
        assert_eq!(quick_move(&state, Source::Freecell(0)), None);
    }

    #[test]
    fn test_quick_move_requires_top_card() {
        let mut state = GameState::empty();
        state.columns[0].push_back(card(1, Suit::Clubs));
        state.columns[0].push_back(card(5, Suit::Hearts));

        assert_eq!(quick_move(&state, Source::Column { index: 0, depth: 0 }), None);
        assert_eq!(quick_move(&state, Source::Column { index: 0, depth: usize::MAX }), None);
        assert_eq!(quick_move(&state, Source::Column { index: 1, depth: 0 }), None);
    }

    #[test]
    fn test_quick_move_no_space() {
        let mut state = GameState::empty();
        state.columns[0].push_back(card(5, Suit::Clubs));
        state.freecells = [Some(card(9, Suit::Hearts)); 4];

        assert_eq!(quick_move(&state, Source::Column { index: 0, depth: 0 }), None);
    }
}
