//! Zone addressing: where a move comes from and where it goes.
//!
//! `Zone` is a closed variant so the validator and executor match it
//! exhaustively. `ZoneAddress` is the loose `(kind, index)` form used by
//! drop-target registration and external callers; convert with
//! `Zone::from_address` / `Zone::address`.

use serde::{Deserialize, Serialize};

use crate::core::{Suit, COLUMN_COUNT, FREECELL_COUNT};

/// A move destination (or, without depth, a source zone).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Freecell slot 0-3.
    Freecell(usize),
    /// Tableau column 0-7.
    Column(usize),
    /// Foundation pile for a suit.
    Foundation(Suit),
}

impl Zone {
    /// Loose `(kind, index)` form. Foundations use the suit's canonical index.
    #[must_use]
    pub fn address(self) -> ZoneAddress {
        match self {
            Zone::Freecell(index) => ZoneAddress::new(ZoneKind::Freecell, index),
            Zone::Column(index) => ZoneAddress::new(ZoneKind::Column, index),
            Zone::Foundation(suit) => ZoneAddress::new(ZoneKind::Foundation, suit.index()),
        }
    }

    /// Resolve a `(kind, index)` address.
    ///
    /// Returns `None` when the index is out of range for its kind.
    #[must_use]
    pub fn from_address(address: ZoneAddress) -> Option<Self> {
        let ZoneAddress { kind, index } = address;
        match kind {
            ZoneKind::Freecell if index < FREECELL_COUNT => Some(Zone::Freecell(index)),
            ZoneKind::Column if index < COLUMN_COUNT => Some(Zone::Column(index)),
            ZoneKind::Foundation => Suit::from_index(index).map(Zone::Foundation),
            _ => None,
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Zone::Freecell(i) => write!(f, "cell {i}"),
            Zone::Column(i) => write!(f, "col {i}"),
            Zone::Foundation(suit) => write!(f, "found {suit}"),
        }
    }
}

/// Kind tag of a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Freecell,
    Column,
    Foundation,
}

/// `(zoneType, zoneIndex)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneAddress {
    pub kind: ZoneKind,
    pub index: usize,
}

impl ZoneAddress {
    #[must_use]
    pub const fn new(kind: ZoneKind, index: usize) -> Self {
        Self { kind, index }
    }
}

/// Where moving cards are picked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// The single card in a freecell slot.
    Freecell(usize),
    /// The suffix of a column starting at `depth` (0 = bottom card).
    Column { index: usize, depth: usize },
}

impl Source {
    /// The zone this source lives in.
    #[must_use]
    pub const fn zone(self) -> Zone {
        match self {
            Source::Freecell(index) => Zone::Freecell(index),
            Source::Column { index, .. } => Zone::Column(index),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Freecell(i) => write!(f, "cell {i}"),
            Source::Column { index, depth } => write!(f, "col {index}[{depth}]"),
        }
    }
}

/// A proposed move: pick up at `from`, drop at `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Source,
    pub to: Zone,
}

impl Move {
    #[must_use]
    pub const fn new(from: Source, to: Zone) -> Self {
        Self { from, to }
    }

    /// Freecell card to a destination.
    #[must_use]
    pub const fn from_freecell(cell: usize, to: Zone) -> Self {
        Self::new(Source::Freecell(cell), to)
    }

    /// Column suffix starting at `depth` to a destination.
    #[must_use]
    pub const fn from_column(index: usize, depth: usize, to: Zone) -> Self {
        Self::new(Source::Column { index, depth }, to)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_round_trip() {
        let zones = [
            Zone::Freecell(0),
            Zone::Freecell(3),
            Zone::Column(7),
            Zone::Foundation(Suit::Spades),
            Zone::Foundation(Suit::Diamonds),
        ];
        for zone in zones {
            assert_eq!(Zone::from_address(zone.address()), Some(zone));
        }
    }

    #[test]
    fn test_address_out_of_range() {
        assert_eq!(Zone::from_address(ZoneAddress::new(ZoneKind::Freecell, 4)), None);
        assert_eq!(Zone::from_address(ZoneAddress::new(ZoneKind::Column, 8)), None);
        assert_eq!(Zone::from_address(ZoneAddress::new(ZoneKind::Foundation, 4)), None);
    }

    #[test]
    fn test_foundation_address_uses_suit_order() {
        assert_eq!(
            Zone::from_address(ZoneAddress::new(ZoneKind::Foundation, 1)),
            Some(Zone::Foundation(Suit::Hearts))
        );
        assert_eq!(Zone::Foundation(Suit::Clubs).address().index, 2);
    }

    #[test]
    fn test_source_zone() {
        assert_eq!(Source::Freecell(2).zone(), Zone::Freecell(2));
        assert_eq!(Source::Column { index: 5, depth: 3 }.zone(), Zone::Column(5));
    }

    #[test]
    fn test_move_display() {
        let mv = Move::from_column(3, 5, Zone::Freecell(1));
        assert_eq!(mv.to_string(), "col 3[5] -> cell 1");
        let mv = Move::from_freecell(0, Zone::Foundation(Suit::Hearts));
        assert_eq!(mv.to_string(), "cell 0 -> found ♥");
    }

    #[test]
    fn test_address_serde() {
        let address = ZoneAddress::new(ZoneKind::Foundation, 2);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, r#"{"kind":"foundation","index":2}"#);
    }
}
