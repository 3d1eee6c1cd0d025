use crate::game::bid::{BidAction, BidError, BidOutcome, BidRound};
use crate::game::rules::{GameRules, LeaderRule, RulesError, ScoringRule, TrumpRule};
use crate::game::track::{TrickError, TrickRound};
use crate::model::card::Card;
use crate::model::deck::{Deck, DeckError};
use crate::model::declaration::Declaration;
use crate::model::field::Field;
use crate::model::player::Player;
use crate::model::suit::Suit;
use core::fmt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Terminal result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// Most tricks wins; ties go to the lowest seat.
    TrickCount { winner: usize, points: i32 },
    /// The declarer judged against the declared target.
    Contract {
        declarer: usize,
        declaration: Declaration,
        achieved: bool,
        score: i32,
    },
    /// Every seat passed the bid; no trick was played.
    NoContract,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::TrickCount { winner, points } => {
                write!(f, "seat {winner} wins with {points} tricks")
            }
            GameOutcome::Contract {
                declaration,
                achieved,
                score,
                ..
            } => {
                let verdict = if *achieved { "made" } else { "failed" };
                write!(f, "the declarer {verdict} {declaration} for {score:+}")
            }
            GameOutcome::NoContract => f.write_str("every seat passed; no contract"),
        }
    }
}

/// What one `advance` did, with names resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Dealt {
        seats: usize,
        hand_size: usize,
        widow: usize,
    },
    Bid {
        seat: usize,
        name: String,
        action: BidAction,
    },
    BidFinished {
        declarer: usize,
        name: String,
        declaration: Declaration,
    },
    Played {
        seat: usize,
        name: String,
        card: Card,
        trump_fixed: Option<Suit>,
    },
    TrickWon {
        seat: usize,
        name: String,
        trick: u32,
    },
    Finished(GameOutcome),
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Dealt {
                seats,
                hand_size,
                widow,
            } => write!(
                f,
                "dealt {hand_size} cards to each of {seats} seats ({widow} to the widow)"
            ),
            GameEvent::Bid { name, action, .. } => match action {
                BidAction::Skipped => write!(f, "{name} has already passed"),
                BidAction::AutoPassed => write!(f, "{name} passed (nothing left to call)"),
                BidAction::Passed => write!(f, "{name} passed"),
                BidAction::Declared(declaration) => {
                    write!(f, "{name} declared {declaration}")
                }
            },
            GameEvent::BidFinished {
                name, declaration, ..
            } => write!(f, "{name} becomes the declarer with {declaration}"),
            GameEvent::Played {
                name,
                card,
                trump_fixed,
                ..
            } => match trump_fixed {
                Some(suit) => write!(f, "{name} played {card}, fixing {suit} as trump"),
                None => write!(f, "{name} played {card}"),
            },
            GameEvent::TrickWon { name, trick, .. } => {
                write!(f, "{name} wins trick {trick}")
            }
            GameEvent::Finished(outcome) => write!(f, "{outcome}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// `advance` was called after the match reached its outcome.
    Finished,
    Rules(RulesError),
    Deck(DeckError),
    Bid(BidError),
    Trick(TrickError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Finished => f.write_str("the game is already finished"),
            GameError::Rules(err) => write!(f, "{err}"),
            GameError::Deck(err) => write!(f, "{err}"),
            GameError::Bid(err) => write!(f, "{err}"),
            GameError::Trick(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<RulesError> for GameError {
    fn from(err: RulesError) -> Self {
        GameError::Rules(err)
    }
}

impl From<DeckError> for GameError {
    fn from(err: DeckError) -> Self {
        GameError::Deck(err)
    }
}

impl From<BidError> for GameError {
    fn from(err: BidError) -> Self {
        GameError::Bid(err)
    }
}

impl From<TrickError> for GameError {
    fn from(err: TrickError) -> Self {
        GameError::Trick(err)
    }
}

#[derive(Debug)]
enum Phase {
    Start,
    Bidding(BidRound),
    Playing { trick: TrickRound, number: u32 },
    Finished(GameOutcome),
}

/// One match: rules, table and phase machine. `advance` performs exactly
/// one atomic action (the deal announcement, one bid turn, one card play or
/// one trick resolution), so a blocking driver loops `play_to_end` while an
/// event-driven front-end calls `advance` once per trigger.
#[derive(Debug)]
pub struct Game {
    rules: GameRules,
    field: Field,
    rng: StdRng,
    seed: u64,
    phase: Phase,
    declarer: Option<usize>,
    last_message: Option<String>,
}

impl Game {
    /// Builds a match from a random seed.
    pub fn new(rules: GameRules, players: Vec<Player>) -> Result<Self, GameError> {
        let seed = rand::random::<u64>();
        Self::with_seed(rules, players, seed)
    }

    /// Builds a match deterministically: shuffles, runs any scripted
    /// deal-outs, deals the open hands and the widow, and fixes the trump
    /// when the rules name one up front.
    pub fn with_seed(rules: GameRules, players: Vec<Player>, seed: u64) -> Result<Self, GameError> {
        rules.validate(players.len())?;
        let mut rng = StdRng::seed_from_u64(seed);

        let mut deck = if rules.with_jokers {
            Deck::with_jokers()
        } else {
            Deck::standard()
        };
        deck.shuffle_in_place(&mut rng);
        let mut field = Field::new(deck, players, rules.follow_suit);

        // Scripted seats pull their exact cards before the open deal so the
        // targets are still in the deck.
        for seat in 0..field.seat_count() {
            if let Some(script) = &rules.deal_script {
                if let Some(targets) = script.cards_for(seat) {
                    let targets = targets.to_vec();
                    let cards = field.deck_mut().pull_out(&targets)?;
                    field.player_mut(seat).take_hand(cards);
                }
            }
        }
        for seat in 0..field.seat_count() {
            if !field.player(seat).hand().is_empty() {
                continue;
            }
            let hand = field.deck_mut().deal(rules.hand_size);
            field.player_mut(seat).take_hand(hand);
        }
        let widow = field.deck_mut().deal(rules.widow_size);
        field.set_widow(widow);

        match rules.trump {
            TrumpRule::Fixed(suit) => field.set_trump(suit),
            TrumpRule::RandomSuit => {
                let suit = Suit::from_index(rng.gen_range(0..Suit::ALL.len()))
                    .expect("a drawn suit index is always in range");
                field.set_trump(suit);
            }
            TrumpRule::DeclarersLead => {}
        }
        debug!(seed, seats = field.seat_count(), trump = ?field.trump(), "match set up");

        Ok(Self {
            rules,
            field,
            rng,
            seed,
            phase: Phase::Start,
            declarer: None,
            last_message: None,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn declarer(&self) -> Option<usize> {
        self.declarer
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    pub fn is_bidding(&self) -> bool {
        matches!(self.phase, Phase::Bidding(_))
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The latest event rendered as text, for state exports.
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// The seat whose decision the next `advance` consumes, if any. None at
    /// the deal, at a trick boundary and after the finish.
    pub fn current_seat(&self) -> Option<usize> {
        match &self.phase {
            Phase::Start | Phase::Finished(_) => None,
            Phase::Bidding(round) => Some(round.next_seat(self.field.seat_count())),
            Phase::Playing { trick, .. } => {
                if trick.is_complete(self.field.seat_count()) {
                    None
                } else {
                    Some(trick.next_seat(self.field.seat_count()))
                }
            }
        }
    }

    /// Stages a hand index for a seat's next card choice.
    pub fn queue_card(&mut self, seat: usize, index: usize) -> bool {
        self.field.player_mut(seat).queue_card(index)
    }

    /// Stages a candidate index for a seat's next declaration choice.
    pub fn queue_declaration(&mut self, seat: usize, index: usize) -> bool {
        self.field.player_mut(seat).queue_declaration(index)
    }

    /// Performs exactly one atomic step and reports what happened.
    pub fn advance(&mut self) -> Result<GameEvent, GameError> {
        let event = self.step()?;
        self.last_message = Some(event.to_string());
        debug!(event = %event, "game step");
        Ok(event)
    }

    /// Blocking driver: loops `advance` until the match is decided.
    pub fn play_to_end(&mut self) -> Result<GameOutcome, GameError> {
        loop {
            if let Phase::Finished(outcome) = self.phase {
                return Ok(outcome);
            }
            self.advance()?;
        }
    }

    fn step(&mut self) -> Result<GameEvent, GameError> {
        if matches!(self.phase, Phase::Start) {
            return Ok(self.open());
        }

        let seat_count = self.field.seat_count();
        match &mut self.phase {
            Phase::Start => unreachable!("handled above"),
            Phase::Finished(_) => Err(GameError::Finished),
            Phase::Bidding(round) => {
                let event = round.advance(&mut self.field, &mut self.rng)?;
                let best = round.best();
                match event.outcome {
                    Some(BidOutcome::AllPassed) => {
                        let outcome = GameOutcome::NoContract;
                        self.phase = Phase::Finished(outcome);
                        Ok(GameEvent::Finished(outcome))
                    }
                    Some(BidOutcome::Declarer(declarer)) => {
                        self.declarer = Some(declarer);
                        self.phase = Phase::Playing {
                            trick: TrickRound::new(declarer),
                            number: 1,
                        };
                        Ok(GameEvent::BidFinished {
                            declarer,
                            name: self.field.player(declarer).name().to_string(),
                            declaration: best,
                        })
                    }
                    None => Ok(GameEvent::Bid {
                        seat: event.seat,
                        name: self.field.player(event.seat).name().to_string(),
                        action: event.action,
                    }),
                }
            }
            Phase::Playing { trick, number } => {
                let number = *number;
                if trick.is_complete(seat_count) {
                    let winner = trick
                        .winner_seat(&self.field)
                        .expect("a complete trick has plays");
                    self.field.player_mut(winner).add_points(1);
                    self.field.clear();

                    let hands_empty = self
                        .field
                        .players()
                        .iter()
                        .all(|player| player.hand().is_empty());
                    if hands_empty {
                        let outcome = Self::judge(&self.rules, &self.field, self.declarer);
                        self.phase = Phase::Finished(outcome);
                        return Ok(GameEvent::Finished(outcome));
                    }

                    let leader = match self.rules.leader {
                        LeaderRule::FirstSeat => 0,
                        LeaderRule::RandomThenTrickWinner
                        | LeaderRule::DeclarerThenTrickWinner => winner,
                    };
                    self.phase = Phase::Playing {
                        trick: TrickRound::new(leader),
                        number: number + 1,
                    };
                    Ok(GameEvent::TrickWon {
                        seat: winner,
                        name: self.field.player(winner).name().to_string(),
                        trick: number,
                    })
                } else {
                    let trump_from_lead = self.rules.has_bid_round() && number == 1;
                    let trump_before = self.field.trump();
                    let play = trick.advance(&mut self.field, &mut self.rng, trump_from_lead)?;
                    let trump_fixed = match (trump_before, self.field.trump()) {
                        (None, Some(suit)) => Some(suit),
                        _ => None,
                    };
                    Ok(GameEvent::Played {
                        seat: play.seat,
                        name: self.field.player(play.seat).name().to_string(),
                        card: play.card,
                        trump_fixed,
                    })
                }
            }
        }
    }

    /// Enters the first decision phase and announces the deal.
    fn open(&mut self) -> GameEvent {
        let seats = self.field.seat_count();
        self.phase = if self.rules.has_bid_round() {
            Phase::Bidding(BidRound::new(seats, &mut self.rng))
        } else {
            let leader = match self.rules.leader {
                LeaderRule::FirstSeat => 0,
                LeaderRule::RandomThenTrickWinner => self.rng.gen_range(0..seats),
                LeaderRule::DeclarerThenTrickWinner => 0,
            };
            Phase::Playing {
                trick: TrickRound::new(leader),
                number: 1,
            }
        };
        GameEvent::Dealt {
            seats,
            hand_size: self.rules.hand_size,
            widow: self.rules.widow_size,
        }
    }

    fn judge(rules: &GameRules, field: &Field, declarer: Option<usize>) -> GameOutcome {
        match rules.scoring {
            ScoringRule::TrickCount => {
                let mut winner = 0;
                for (seat, player) in field.players().iter().enumerate().skip(1) {
                    if player.points() > field.player(winner).points() {
                        winner = seat;
                    }
                }
                GameOutcome::TrickCount {
                    winner,
                    points: field.player(winner).points(),
                }
            }
            ScoringRule::Contract => match declarer {
                Some(declarer) => {
                    let declaration = field.player(declarer).declaration();
                    let tricks = field.player(declarer).points().max(0) as u32;
                    let achieved = declaration.is_achieved(tricks);
                    GameOutcome::Contract {
                        declarer,
                        declaration,
                        achieved,
                        score: declaration.score(achieved),
                    }
                }
                None => GameOutcome::NoContract,
            },
        }
    }
}
