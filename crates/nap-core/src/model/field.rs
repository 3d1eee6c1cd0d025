use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::player::Player;
use crate::model::suit::Suit;

/// One card committed to the current trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub seat: usize,
    pub card: Card,
}

/// Shared table state: the deck, the seats, the trump, the widow, the cards
/// in play this trick and the trash pile. Everything mutable in a match
/// lives here; the engines hold only rotation counters.
#[derive(Debug)]
pub struct Field {
    deck: Deck,
    players: Vec<Player>,
    trump: Option<Suit>,
    widow: Vec<Card>,
    plays: Vec<Play>,
    trash: Vec<Card>,
    follow_suit: bool,
}

impl Field {
    pub fn new(deck: Deck, players: Vec<Player>, follow_suit: bool) -> Self {
        Self {
            deck,
            players,
            trump: None,
            widow: Vec::new(),
            plays: Vec::new(),
            trash: Vec::new(),
            follow_suit,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn player(&self, seat: usize) -> &Player {
        &self.players[seat]
    }

    pub fn player_mut(&mut self, seat: usize) -> &mut Player {
        &mut self.players[seat]
    }

    pub fn get_player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.name() == name)
    }

    pub fn seat_count(&self) -> usize {
        self.players.len()
    }

    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    pub fn set_trump(&mut self, trump: Suit) {
        self.trump = Some(trump);
    }

    pub fn widow(&self) -> &[Card] {
        &self.widow
    }

    pub fn set_widow(&mut self, widow: Vec<Card>) {
        self.widow = widow;
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn trash(&self) -> &[Card] {
        &self.trash
    }

    pub fn follow_suit(&self) -> bool {
        self.follow_suit
    }

    /// The suit to follow this trick: the first in-play card's suit. None
    /// when nothing has been played yet or a joker led.
    pub fn lead(&self) -> Option<Suit> {
        self.plays.first().and_then(|play| play.card.suit())
    }

    /// The trick-resolution strength of a suit under the current trump and
    /// lead. Recomputed per call; trump and lead both move between tricks.
    pub fn suit_strength(&self, suit: Option<Suit>) -> u8 {
        match suit {
            Some(suit) if Some(suit) == self.trump => 6,
            Some(suit) if Some(suit) == self.lead() => 5,
            Some(suit) => suit.strength(),
            None => 0,
        }
    }

    /// Records one play. The first play of a trick fixes the lead implicitly
    /// through `lead()`.
    pub fn put_card(&mut self, seat: usize, card: Card) {
        self.plays.push(Play { seat, card });
    }

    /// Moves the trick's cards to the trash. Called exactly once per trick
    /// boundary.
    pub fn clear(&mut self) {
        self.trash.extend(self.plays.drain(..).map(|play| play.card));
    }

    /// Total cards across every zone. Constant for the life of a match.
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self
                .players
                .iter()
                .map(|player| player.hand().len())
                .sum::<usize>()
            + self.widow.len()
            + self.plays.len()
            + self.trash.len()
    }
}
