//! Safe autoplay: which cards can go to foundations without being missed.
//!
//! A card of rank `r > 2` is safe only when both opposite-color foundations
//! already hold rank `r - 1` or higher; then no lower opposite-color card
//! could still need it as a placement target. Aces and twos are always safe.
//!
//! One scan finds at most one move: freecells first (slot order), then
//! column tops (column order).

use crate::core::{Card, GameState, FREECELL_COUNT};
use crate::zones::{Move, Source, Zone};

use super::executor::apply_move;
use super::validator::can_move_to_foundation;

/// Is it safe to send `card` to its foundation in `state`?
///
/// Does not check foundation legality; see `can_autoplay`.
#[must_use]
pub fn is_safe_autoplay(state: &GameState, card: Card) -> bool {
    let rank = card.rank.value();
    if rank <= 2 {
        return true;
    }
    card.suit
        .opposite_suits()
        .into_iter()
        .all(|suit| state.foundation_rank(suit) >= rank - 1)
}

/// Foundation-legal and safe.
#[must_use]
pub fn can_autoplay(state: &GameState, card: Card) -> bool {
    can_move_to_foundation(state, card) && is_safe_autoplay(state, card)
}

/// First safe foundation move, if any.
#[must_use]
pub fn find_autoplay_move(state: &GameState) -> Option<Move> {
    let from_cells = (0..FREECELL_COUNT).find_map(|cell| {
        let card = state.freecell(cell)?;
        can_autoplay(state, card).then(|| Move::new(Source::Freecell(cell), Zone::Foundation(card.suit)))
    });
    if from_cells.is_some() {
        return from_cells;
    }

    state.columns.iter().enumerate().find_map(|(index, column)| {
        let card = *column.last()?;
        let depth = column.len() - 1;
        can_autoplay(state, card).then(|| Move::from_column(index, depth, Zone::Foundation(card.suit)))
    })
}

/// Perform one autoplay scan: the next state and the move taken, if any.
#[must_use]
pub fn autoplay_step(state: &GameState) -> Option<(Move, GameState)> {
    let mv = find_autoplay_move(state)?;
    apply_move(state, mv).ok().map(|next| (mv, next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{card, Suit};
    use im::Vector;

    fn foundation(suit: Suit, top: u8) -> Vector<Card> {
        (1..=top).map(|rank| card(rank, suit)).collect()
    }

    #[test]
    fn test_low_ranks_always_safe() {
        let state = GameState::empty();
        assert!(is_safe_autoplay(&state, card(1, Suit::Hearts)));
        assert!(is_safe_autoplay(&state, card(2, Suit::Spades)));
        assert!(!is_safe_autoplay(&state, card(3, Suit::Spades)));
    }

    #[test]
    fn test_three_of_spades_waits_for_red_twos() {
        let mut state = GameState::empty();
        state.foundations.spades = foundation(Suit::Spades, 2);
        state.foundations.clubs = foundation(Suit::Clubs, 1);
        state.freecells[0] = Some(card(3, Suit::Spades));

        assert!(can_move_to_foundation(&state, card(3, Suit::Spades)));
        assert!(!can_autoplay(&state, card(3, Suit::Spades)));
        assert_eq!(find_autoplay_move(&state), None);

        state.foundations.hearts = foundation(Suit::Hearts, 2);
        assert_eq!(find_autoplay_move(&state), None);

        state.foundations.diamonds = foundation(Suit::Diamonds, 2);
        assert_eq!(
            find_autoplay_move(&state),
            Some(Move::from_freecell(0, Zone::Foundation(Suit::Spades)))
        );
    }

    #[test]
    fn test_freecells_scanned_before_columns() {
        let mut state = GameState::empty();
        state.columns[0].push_back(card(1, Suit::Clubs));
        state.freecells[2] = Some(card(1, Suit::Hearts));

        assert_eq!(
            find_autoplay_move(&state),
            Some(Move::from_freecell(2, Zone::Foundation(Suit::Hearts)))
        );
    }

    #[test]
    fn test_column_top_only() {
        let mut state = GameState::empty();
        state.columns[4].push_back(card(1, Suit::Clubs));
        state.columns[4].push_back(card(9, Suit::Hearts));
        assert_eq!(find_autoplay_move(&state), None);

        state.columns[5].push_back(card(1, Suit::Diamonds));
        assert_eq!(
            find_autoplay_move(&state),
            Some(Move::from_column(5, 0, Zone::Foundation(Suit::Diamonds)))
        );
    }

    #[test]
    fn test_autoplay_step_applies_one_move() {
        let mut state = GameState::empty();
        state.columns[0].push_back(card(2, Suit::Clubs));
        state.columns[0].push_back(card(1, Suit::Clubs));

        let (mv, next) = autoplay_step(&state).unwrap();
        assert_eq!(mv, Move::from_column(0, 1, Zone::Foundation(Suit::Clubs)));
        assert_eq!(next.foundation_rank(Suit::Clubs), 1);
        assert_eq!(next.columns[0].len(), 1);
        assert_eq!(next.moves, 1);

        let (_, next) = autoplay_step(&next).unwrap();
        assert_eq!(next.foundation_rank(Suit::Clubs), 2);
        assert!(autoplay_step(&next).is_none());
    }
}
