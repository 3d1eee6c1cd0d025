use crate::model::card::Card;
use crate::model::suit::Suit;

/// A player's hand, kept sorted by suit then strength (jokers at the end).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The suit-following rule: with an active lead suit and at least one
    /// card of it in hand, only that suit may be played; otherwise the whole
    /// hand is legal.
    pub fn playable(&self, lead: Option<Suit>) -> Vec<Card> {
        if let Some(lead) = lead {
            let following: Vec<Card> = self
                .cards
                .iter()
                .copied()
                .filter(|card| card.suit() == Some(lead))
                .collect();
            if !following.is_empty() {
                return following;
            }
        }
        self.cards.clone()
    }

    fn sort(&mut self) {
        self.cards
            .sort_by_key(|card| (card.suit().map_or(u8::MAX, Suit::strength), card.strength()));
    }
}
