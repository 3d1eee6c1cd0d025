use crate::model::card::{Card, JokerRank};
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use rand::seq::SliceRandom;

/// An ordered, depletable pile of cards. `deal` and `pull_out` are the only
/// ways cards leave it, which is what keeps the whole-match card count
/// invariant checkable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    CardNotFound(Card),
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::CardNotFound(card) => {
                write!(f, "{card} is not in the remaining deck")
            }
        }
    }
}

impl std::error::Error for DeckError {}

impl Deck {
    /// The 52 suited cards, no jokers.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// The full 54-card pool: 52 suited cards plus both jokers.
    pub fn with_jokers() -> Self {
        let mut deck = Self::standard();
        deck.cards.push(Card::Joker(JokerRank::Strong));
        deck.cards.push(Card::Joker(JokerRank::Weak));
        deck
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Removes and returns up to `count` cards from the top of the deck.
    /// A short deck hands back whatever remains instead of failing.
    pub fn deal(&mut self, count: usize) -> Vec<Card> {
        let take = count.min(self.cards.len());
        self.cards.split_off(self.cards.len() - take)
    }

    /// Removes the exact listed cards regardless of where they sit in the
    /// deck. Fails loudly if any target is absent: a missing card means the
    /// caller's setup is wrong, not the deck.
    pub fn pull_out(&mut self, targets: &[Card]) -> Result<Vec<Card>, DeckError> {
        for &target in targets {
            if !self.cards.contains(&target) {
                return Err(DeckError::CardNotFound(target));
            }
        }

        let mut pulled = Vec::with_capacity(targets.len());
        for &target in targets {
            if let Some(index) = self.cards.iter().position(|&card| card == target) {
                pulled.push(self.cards.remove(index));
            }
        }
        Ok(pulled)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::Deck;
    use crate::model::card::{Card, JokerRank};
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let deck = Deck::standard();
        let unique: HashSet<_> = deck.cards().iter().copied().collect();
        assert_eq!(deck.len(), 52);
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn joker_deck_has_54_cards() {
        let deck = Deck::with_jokers();
        assert_eq!(deck.len(), 54);
        assert!(deck.cards().contains(&Card::Joker(JokerRank::Strong)));
        assert!(deck.cards().contains(&Card::Joker(JokerRank::Weak)));
    }

    #[test]
    fn shuffle_preserves_composition() {
        let mut deck = Deck::standard();
        let before: HashSet<_> = deck.cards().iter().copied().collect();
        let mut rng = StdRng::seed_from_u64(9);
        deck.shuffle_in_place(&mut rng);
        let after: HashSet<_> = deck.cards().iter().copied().collect();
        assert_eq!(before, after);
        assert_eq!(deck.len(), 52);
    }

    #[test]
    fn deal_removes_requested_count() {
        let mut deck = Deck::standard();
        let dealt = deck.deal(5);
        assert_eq!(dealt.len(), 5);
        assert_eq!(deck.len(), 47);
    }

    #[test]
    fn short_deal_returns_remainder() {
        let mut deck = Deck::standard();
        deck.deal(50);
        let dealt = deck.deal(5);
        assert_eq!(dealt.len(), 2);
        assert!(deck.is_empty());
        assert!(deck.deal(3).is_empty());
    }

    #[test]
    fn pull_out_extracts_specific_cards() {
        let mut deck = Deck::standard();
        let targets = [
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::Two, Suit::Club),
        ];
        let pulled = deck.pull_out(&targets).unwrap();
        assert_eq!(pulled, targets.to_vec());
        assert_eq!(deck.len(), 50);
        assert!(!deck.cards().contains(&targets[0]));
    }

    #[test]
    fn pull_out_missing_card_fails_without_mutating() {
        let mut deck = Deck::standard();
        let ace = Card::new(Rank::Ace, Suit::Spade);
        deck.pull_out(&[ace]).unwrap();
        let result = deck.pull_out(&[Card::new(Rank::Two, Suit::Club), ace]);
        assert!(result.is_err());
        assert_eq!(deck.len(), 51);
    }
}
