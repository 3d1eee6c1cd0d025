use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// The two jokers. The strong joker outranks the weak one; both outrank
/// every suited card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JokerRank {
    Weak,
    Strong,
}

impl JokerRank {
    pub const fn strength(self) -> u8 {
        match self {
            JokerRank::Weak => 15,
            JokerRank::Strong => 16,
        }
    }
}

/// A playing card: one of the 52 suited cards or one of the two jokers.
///
/// Card-versus-card strength is by rank alone; the suit never enters into
/// it. Cross-suit strength depends on trump and lead and is computed by the
/// field, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    Standard { rank: Rank, suit: Suit },
    Joker(JokerRank),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardError {
    InvalidNumber(u8),
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardError::InvalidNumber(number) => {
                write!(f, "card number {number} is outside 1-13")
            }
        }
    }
}

impl std::error::Error for CardError {}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Card::Standard { rank, suit }
    }

    /// Builds a suited card from its raw number (1 = ace, 11-13 = faces).
    pub fn from_number(number: u8, suit: Suit) -> Result<Self, CardError> {
        if !(1..=13).contains(&number) {
            return Err(CardError::InvalidNumber(number));
        }
        match Rank::from_value(number) {
            Some(rank) => Ok(Card::Standard { rank, suit }),
            None => Err(CardError::InvalidNumber(number)),
        }
    }

    pub const fn suit(self) -> Option<Suit> {
        match self {
            Card::Standard { suit, .. } => Some(suit),
            Card::Joker(_) => None,
        }
    }

    pub const fn rank(self) -> Option<Rank> {
        match self {
            Card::Standard { rank, .. } => Some(rank),
            Card::Joker(_) => None,
        }
    }

    /// Rank-only strength: 2-14 for suited cards, 15-16 for the jokers.
    pub const fn strength(self) -> u8 {
        match self {
            Card::Standard { rank, .. } => rank.value(),
            Card::Joker(joker) => joker.strength(),
        }
    }

    pub const fn is_joker(self) -> bool {
        matches!(self, Card::Joker(_))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Standard { rank, suit } => write!(f, "{rank}{suit}"),
            Card::Joker(JokerRank::Strong) => f.write_str("Joker (strong)"),
            Card::Joker(JokerRank::Weak) => f.write_str("Joker (weak)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, CardError, JokerRank};
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn from_number_promotes_ace() {
        let card = Card::from_number(1, Suit::Spade).unwrap();
        assert_eq!(card.rank(), Some(Rank::Ace));
        assert_eq!(card.strength(), 14);
    }

    #[test]
    fn from_number_rejects_out_of_range() {
        assert_eq!(
            Card::from_number(0, Suit::Club),
            Err(CardError::InvalidNumber(0))
        );
        assert_eq!(
            Card::from_number(14, Suit::Club),
            Err(CardError::InvalidNumber(14))
        );
    }

    #[test]
    fn jokers_outrank_every_suited_card() {
        let ace = Card::new(Rank::Ace, Suit::Spade);
        assert!(Card::Joker(JokerRank::Weak).strength() > ace.strength());
        assert!(
            Card::Joker(JokerRank::Strong).strength() > Card::Joker(JokerRank::Weak).strength()
        );
        assert_eq!(Card::Joker(JokerRank::Strong).suit(), None);
    }

    #[test]
    fn strength_ignores_suit() {
        let spade_ten = Card::new(Rank::Ten, Suit::Spade);
        let club_ten = Card::new(Rank::Ten, Suit::Club);
        assert_eq!(spade_ten.strength(), club_ten.strength());
        assert_ne!(spade_ten, club_ten);
    }

    #[test]
    fn display_distinguishes_jokers() {
        assert_eq!(Card::new(Rank::Ace, Suit::Spade).to_string(), "A♠");
        assert_eq!(Card::new(Rank::Ten, Suit::Heart).to_string(), "10♥");
        assert_eq!(Card::Joker(JokerRank::Strong).to_string(), "Joker (strong)");
        assert_eq!(Card::Joker(JokerRank::Weak).to_string(), "Joker (weak)");
    }
}
