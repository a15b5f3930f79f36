//! Deck creation, shuffling and the initial deal.
//!
//! The deal is round-robin: card `i` of the shuffled deck goes to column
//! `i % 8`, so columns 0-3 receive 7 cards and columns 4-7 receive 6.

use super::card::{Card, Rank, Suit};
use super::rng::GameRng;
use super::state::{GameState, COLUMN_COUNT, DECK_SIZE};

/// Create the 52-card deck in canonical order (suit-major, Ace to King).
#[must_use]
pub fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::all() {
            deck.push(Card::new(rank, suit));
        }
    }
    deck
}

/// Unbiased in-place Fisher-Yates shuffle.
pub fn shuffle(deck: &mut [Card], rng: &mut GameRng) {
    rng.shuffle(deck);
}

/// Distribute cards round-robin into the tableau, in the given order.
///
/// Freecells and foundations start empty; the move counter starts at 0.
#[must_use]
pub fn deal_from_order(deck: Vec<Card>) -> GameState {
    let mut state = GameState::empty();
    for (index, card) in deck.into_iter().enumerate() {
        state.columns[index % COLUMN_COUNT].push_back(card);
    }
    state
}

/// Shuffle a fresh deck and deal it.
#[must_use]
pub fn deal(rng: &mut GameRng) -> GameState {
    let mut deck = create_deck();
    shuffle(&mut deck, rng);
    deal_from_order(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::card;

    #[test]
    fn test_create_deck() {
        let deck = create_deck();
        assert_eq!(deck.len(), 52);
        assert_eq!(deck[0], card(1, Suit::Spades));
        assert_eq!(deck[12], card(13, Suit::Spades));
        assert_eq!(deck[13], card(1, Suit::Hearts));
        assert_eq!(deck[51], card(13, Suit::Diamonds));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(42);
        let mut deck = create_deck();
        shuffle(&mut deck, &mut rng);

        assert_ne!(deck, create_deck());

        let mut ids: Vec<_> = deck.iter().map(|c| c.id()).collect();
        ids.sort();
        let expected: Vec<_> = create_deck().iter().map(|c| c.id()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_shuffle_deterministic() {
        let mut a = create_deck();
        let mut b = create_deck();
        shuffle(&mut a, &mut GameRng::new(9));
        shuffle(&mut b, &mut GameRng::new(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_distribution_sanity() {
        // Position of the first card over many shuffles should be roughly uniform
        let mut counts = [0u32; 4];
        let mut rng = GameRng::new(1234);
        for _ in 0..8000 {
            let mut deck: Vec<Card> = create_deck().into_iter().take(4).collect();
            shuffle(&mut deck, &mut rng);
            let pos = deck.iter().position(|&c| c == card(1, Suit::Spades)).unwrap();
            counts[pos] += 1;
        }
        for count in counts {
            assert!((1700..2300).contains(&count), "skewed: {counts:?}");
        }
    }

    #[test]
    fn test_deal_round_robin() {
        let deck = create_deck();
        let state = deal_from_order(deck.clone());

        for (i, col) in state.columns.iter().enumerate() {
            let expected = if i < 4 { 7 } else { 6 };
            assert_eq!(col.len(), expected, "column {i}");
        }
        assert_eq!(state.columns[0][0], deck[0]);
        assert_eq!(state.columns[7][0], deck[7]);
        assert_eq!(state.columns[0][1], deck[8]);
        assert_eq!(state.columns[3][6], deck[51]);
        assert_eq!(state.empty_freecells(), 4);
        assert_eq!(state.foundation_count(), 0);
        assert_eq!(state.moves, 0);
    }

    #[test]
    fn test_deal_conserves_deck() {
        let state = deal(&mut GameRng::new(77));
        assert!(state.check_invariants().is_ok());
    }
}
