//! Card identity: ranks, suits, colors.
//!
//! ## Card
//!
//! A card is an immutable `(rank, suit)` value. Two cards with the same rank
//! and suit are the same card; a full deck is exactly the 13 × 4 product.
//!
//! ## CardId
//!
//! Dense `0..52` index derived from identity, used as a stable key.

use serde::{Deserialize, Serialize};

/// Card rank, Ace = 1 through King = 13.
///
/// Deserialization rejects values outside `1..=13`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const TWO: Rank = Rank(2);
    pub const KING: Rank = Rank(13);

    /// Number of ranks in a suit.
    pub const COUNT: usize = 13;

    /// Create a rank from its ordinal value.
    ///
    /// Returns `None` outside `1..=13`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 13 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the ordinal value (Ace = 1).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The rank directly above this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// Iterate over all ranks, Ace to King.
    pub fn all() -> impl Iterator<Item = Rank> {
        (1..=13u8).map(Rank)
    }

    /// Short display label ("A", "2" .. "10", "J", "Q", "K").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self.0 {
            1 => "A",
            2 => "2",
            3 => "3",
            4 => "4",
            5 => "5",
            6 => "6",
            7 => "7",
            8 => "8",
            9 => "9",
            10 => "10",
            11 => "J",
            12 => "Q",
            _ => "K",
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::new(value).ok_or_else(|| format!("rank out of range: {value}"))
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Card color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// The other color.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// Card suit. Declaration order is the canonical deck and foundation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    /// All suits in canonical order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    /// Position in canonical order (0-3).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Suit::Spades => 0,
            Suit::Hearts => 1,
            Suit::Clubs => 2,
            Suit::Diamonds => 3,
        }
    }

    /// Suit at a canonical position.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Spades | Suit::Clubs => Color::Black,
        }
    }

    /// The other suit of the same color.
    #[must_use]
    pub const fn twin(self) -> Self {
        match self {
            Suit::Spades => Suit::Clubs,
            Suit::Clubs => Suit::Spades,
            Suit::Hearts => Suit::Diamonds,
            Suit::Diamonds => Suit::Hearts,
        }
    }

    /// Both suits of the opposite color.
    #[must_use]
    pub const fn opposite_suits(self) -> [Suit; 2] {
        match self.color() {
            Color::Red => [Suit::Spades, Suit::Clubs],
            Color::Black => [Suit::Hearts, Suit::Diamonds],
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Spades => "spades",
            Suit::Hearts => "hearts",
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Dense card key in `0..52`: `suit.index() * 13 + (rank - 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Create a card from a rank ordinal. `None` outside `1..=13`.
    #[must_use]
    pub const fn try_new(rank: u8, suit: Suit) -> Option<Self> {
        match Rank::new(rank) {
            Some(rank) => Some(Self::new(rank, suit)),
            None => None,
        }
    }

    /// Stable identity key.
    #[must_use]
    pub const fn id(self) -> CardId {
        CardId((self.suit.index() * Rank::COUNT) as u8 + self.rank.value() - 1)
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.suit.color()
    }

    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self.color(), Color::Red)
    }

    /// Same rank, other suit of the same color.
    #[must_use]
    pub const fn twin(self) -> Self {
        Self::new(self.rank, self.suit.twin())
    }

    /// Can this card sit directly on `base` in a tableau column?
    ///
    /// True when colors alternate and this card is exactly one rank lower.
    #[must_use]
    pub fn stacks_on(self, base: Card) -> bool {
        self.color() != base.color() && self.rank.value() + 1 == base.rank.value()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Shorthand fixture constructor.
#[cfg(test)]
pub(crate) fn card(rank: u8, suit: Suit) -> Card {
    Card::try_new(rank, suit).unwrap()
}
