use crate::model::card::Card;
use crate::model::suit::Suit;
use core::fmt;

/// How the trump suit is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrumpRule {
    /// One suit is trump for the whole match.
    Fixed(Suit),
    /// A uniformly random suit is trump, chosen at setup.
    RandomSuit,
    /// No trump at setup; the declarer's opening lead on trick 1 fixes it.
    DeclarersLead,
}

/// Who leads each trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderRule {
    /// Seat 0 leads every trick.
    FirstSeat,
    /// A random seat leads trick 1; after that the trick winner leads.
    RandomThenTrickWinner,
    /// The declarer leads trick 1; after that the trick winner leads.
    DeclarerThenTrickWinner,
}

/// How the finished match is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringRule {
    /// One point per trick; most tricks wins.
    TrickCount,
    /// The declarer is judged against the declared target and paid the
    /// signed contract value.
    Contract,
}

/// Hand-crafted deal-outs for scripted opponents: listed seats receive the
/// exact cards named, pulled from the deck before the open deal.
#[derive(Debug, Clone, Default)]
pub struct DealScript {
    hands: Vec<(usize, Vec<Card>)>,
}

impl DealScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hand(mut self, seat: usize, cards: Vec<Card>) -> Self {
        self.hands.push((seat, cards));
        self
    }

    pub fn cards_for(&self, seat: usize) -> Option<&[Card]> {
        self.hands
            .iter()
            .find(|(scripted, _)| *scripted == seat)
            .map(|(_, cards)| cards.as_slice())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesError {
    /// The deal would need more cards than the deck holds.
    NotEnoughCards { required: usize, available: usize },
    /// Fewer than two seats were supplied.
    NotEnoughSeats(usize),
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::NotEnoughCards {
                required,
                available,
            } => write!(
                f,
                "the deal needs {required} cards but the deck holds {available}"
            ),
            RulesError::NotEnoughSeats(seats) => {
                write!(f, "a match needs at least 2 seats, got {seats}")
            }
        }
    }
}

impl std::error::Error for RulesError {}

/// One variant as a plain value: a game holds a rules value, a roster and a
/// seed, and everything else follows. Variants differ only in these fields,
/// never in control flow forks of their own.
#[derive(Debug, Clone)]
pub struct GameRules {
    pub hand_size: usize,
    pub widow_size: usize,
    pub with_jokers: bool,
    pub follow_suit: bool,
    pub trump: TrumpRule,
    pub leader: LeaderRule,
    pub scoring: ScoringRule,
    pub deal_script: Option<DealScript>,
}

impl GameRules {
    /// The introductory variant: 3-card hands from a 52-card deck, spades
    /// always trump, no suit-following, seat 0 leads every trick.
    pub fn simple() -> Self {
        Self {
            hand_size: 3,
            widow_size: 0,
            with_jokers: false,
            follow_suit: false,
            trump: TrumpRule::Fixed(Suit::Spade),
            leader: LeaderRule::FirstSeat,
            scoring: ScoringRule::TrickCount,
            deal_script: None,
        }
    }

    /// Random trump, suit-following, 5-card hands, winner leads the next
    /// trick.
    pub fn easy() -> Self {
        Self {
            hand_size: 5,
            widow_size: 0,
            with_jokers: false,
            follow_suit: true,
            trump: TrumpRule::RandomSuit,
            leader: LeaderRule::RandomThenTrickWinner,
            scoring: ScoringRule::TrickCount,
            deal_script: None,
        }
    }

    /// The full bidding variant: 54-card deck, 5-card hands, a 4-card widow,
    /// trump from the declarer's opening lead, contract scoring.
    pub fn napoleon() -> Self {
        Self {
            hand_size: 5,
            widow_size: 4,
            with_jokers: true,
            follow_suit: true,
            trump: TrumpRule::DeclarersLead,
            leader: LeaderRule::DeclarerThenTrickWinner,
            scoring: ScoringRule::Contract,
            deal_script: None,
        }
    }

    pub fn with_deal_script(mut self, script: DealScript) -> Self {
        self.deal_script = Some(script);
        self
    }

    /// Whether a declaration round runs before trick play.
    pub fn has_bid_round(&self) -> bool {
        matches!(self.trump, TrumpRule::DeclarersLead)
    }

    pub fn deck_size(&self) -> usize {
        if self.with_jokers { 54 } else { 52 }
    }

    pub fn validate(&self, seats: usize) -> Result<(), RulesError> {
        if seats < 2 {
            return Err(RulesError::NotEnoughSeats(seats));
        }
        let required = self.hand_size * seats + self.widow_size;
        let available = self.deck_size();
        if required > available {
            return Err(RulesError::NotEnoughCards {
                required,
                available,
            });
        }
        Ok(())
    }
}
