use core::fmt;
use serde::{Deserialize, Serialize};

/// The four suits, ordered by their natural strength in Nap:
/// spade > heart > diamond > club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Club = 1,
    Diamond = 2,
    Heart = 3,
    Spade = 4,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Club),
            1 => Some(Suit::Diamond),
            2 => Some(Suit::Heart),
            3 => Some(Suit::Spade),
            _ => None,
        }
    }

    /// Natural strength (1-4), before trump and lead are considered.
    pub const fn strength(self) -> u8 {
        self as u8
    }

    pub const fn glyph(self) -> char {
        match self {
            Suit::Club => '♣',
            Suit::Diamond => '♦',
            Suit::Heart => '♥',
            Suit::Spade => '♠',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::Suit;

    #[test]
    fn natural_order_puts_spade_on_top() {
        assert!(Suit::Spade > Suit::Heart);
        assert!(Suit::Heart > Suit::Diamond);
        assert!(Suit::Diamond > Suit::Club);
    }

    #[test]
    fn strength_matches_ordinal_value() {
        assert_eq!(Suit::Club.strength(), 1);
        assert_eq!(Suit::Spade.strength(), 4);
    }

    #[test]
    fn from_index_maps_valid_values() {
        assert_eq!(Suit::from_index(3), Some(Suit::Spade));
        assert_eq!(Suit::from_index(4), None);
    }

    #[test]
    fn display_uses_glyphs() {
        assert_eq!(Suit::Spade.to_string(), "♠");
        assert_eq!(Suit::Club.to_string(), "♣");
    }
}
