use crate::model::declaration::Declaration;
use crate::model::field::Field;
use crate::policy::DecisionError;
use core::fmt;
use rand::Rng;
use rand::rngs::StdRng;
use tracing::debug;

/// Terminal state of a declaration round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidOutcome {
    /// One seat holds the best declaration and everyone else passed.
    Declarer(usize),
    /// Every seat passed; trick play must not start.
    AllPassed,
}

/// What one bid step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidAction {
    /// The seat had already passed; its turn is a no-op.
    Skipped,
    /// Pass was the only callable option, taken without consulting the seat.
    AutoPassed,
    Passed,
    Declared(Declaration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidEvent {
    pub seat: usize,
    pub action: BidAction,
    pub outcome: Option<BidOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidError {
    /// `advance` was called after the round reached a terminal state.
    RoundOver,
    Decision(DecisionError),
}

impl fmt::Display for BidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidError::RoundOver => f.write_str("the bid round is already over"),
            BidError::Decision(err) => write!(f, "bid decision failed: {err}"),
        }
    }
}

impl std::error::Error for BidError {}

impl From<DecisionError> for BidError {
    fn from(err: DecisionError) -> Self {
        BidError::Decision(err)
    }
}

/// Round-robin declaration negotiation. Each `advance` runs exactly one
/// seat's turn, so a blocking driver loops it and an event-driven driver
/// calls it once per trigger.
#[derive(Debug)]
pub struct BidRound {
    start_seat: usize,
    step: usize,
    best: Declaration,
    declarer: Option<usize>,
    outcome: Option<BidOutcome>,
}

impl BidRound {
    /// Opens a round starting at a uniformly random seat.
    pub fn new(seat_count: usize, rng: &mut StdRng) -> Self {
        Self::with_start(rng.gen_range(0..seat_count))
    }

    /// Opens a round at a fixed start seat.
    pub fn with_start(start_seat: usize) -> Self {
        Self {
            start_seat,
            step: 0,
            best: Declaration::NoDeclare,
            declarer: None,
            outcome: None,
        }
    }

    pub fn best(&self) -> Declaration {
        self.best
    }

    pub fn declarer(&self) -> Option<usize> {
        self.declarer
    }

    pub fn outcome(&self) -> Option<BidOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// The seat whose turn the next `advance` runs.
    pub fn next_seat(&self, seat_count: usize) -> usize {
        (self.start_seat + self.step) % seat_count
    }

    /// Runs one seat's bid turn. A seat that already passed is skipped; a
    /// seat whose only callable option is a pass is passed automatically;
    /// otherwise the seat's policy chooses from the candidates over the
    /// current best declaration.
    pub fn advance(&mut self, field: &mut Field, rng: &mut StdRng) -> Result<BidEvent, BidError> {
        if self.outcome.is_some() {
            return Err(BidError::RoundOver);
        }

        let seat = self.next_seat(field.seat_count());

        let action = if field.player(seat).declaration().is_pass() {
            BidAction::Skipped
        } else {
            let candidates = self.best.declarable_list();
            if candidates == [Declaration::Pass] {
                field.player_mut(seat).set_declaration(Declaration::Pass);
                BidAction::AutoPassed
            } else {
                let declaration = field.player_mut(seat).declare(rng, &candidates)?;
                if declaration.is_pass() {
                    BidAction::Passed
                } else {
                    self.best = declaration;
                    self.declarer = Some(seat);
                    BidAction::Declared(declaration)
                }
            }
        };

        // A rejected decision returns above without touching the counter, so
        // the same seat acts again once a new selection is staged.
        self.step += 1;
        self.outcome = self.evaluate(field);
        debug!(seat, ?action, outcome = ?self.outcome, "bid step");

        Ok(BidEvent {
            seat,
            action,
            outcome: self.outcome,
        })
    }

    /// Valid finish: all but one seat passed and every seat has made at
    /// least one real call. Invalid finish: everyone passed.
    fn evaluate(&self, field: &Field) -> Option<BidOutcome> {
        let seats = field.seat_count();
        let passed = field
            .players()
            .iter()
            .filter(|player| player.declaration().is_pass())
            .count();
        let all_declared = field
            .players()
            .iter()
            .all(|player| player.declaration().is_declared());

        if passed == seats {
            Some(BidOutcome::AllPassed)
        } else if passed == seats - 1 && all_declared {
            self.declarer.map(BidOutcome::Declarer)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BidAction, BidError, BidOutcome, BidRound};
    use crate::model::declaration::Declaration;
    use crate::model::deck::Deck;
    use crate::model::field::Field;
    use crate::model::player::Player;
    use crate::policy::DecisionError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn table(seats: usize) -> (Field, StdRng) {
        let players = (0..seats)
            .map(|seat| Player::human(format!("seat {seat}")))
            .collect();
        (Field::new(Deck::standard(), players, true), StdRng::seed_from_u64(5))
    }

    fn queue(field: &mut Field, seat: usize, index: usize) {
        assert!(field.player_mut(seat).queue_declaration(index));
    }

    #[test]
    fn all_pass_is_an_invalid_finish() {
        let (mut field, mut rng) = table(3);
        let mut round = BidRound::with_start(0);

        for seat in 0..3 {
            queue(&mut field, seat, 0);
            let event = round.advance(&mut field, &mut rng).unwrap();
            assert_eq!(event.seat, seat);
            assert_eq!(event.action, BidAction::Passed);
        }

        assert_eq!(round.outcome(), Some(BidOutcome::AllPassed));
        assert_eq!(round.declarer(), None);
    }

    #[test]
    fn single_declarer_is_a_valid_finish() {
        let (mut field, mut rng) = table(3);
        let mut round = BidRound::with_start(0);

        // Candidates over no_declare: [pass, two, three, misere, four, nap,
        // wellington]. Seat 0 calls two, the rest pass.
        queue(&mut field, 0, 1);
        let event = round.advance(&mut field, &mut rng).unwrap();
        assert_eq!(event.action, BidAction::Declared(Declaration::Two));

        queue(&mut field, 1, 0);
        round.advance(&mut field, &mut rng).unwrap();
        queue(&mut field, 2, 0);
        let event = round.advance(&mut field, &mut rng).unwrap();

        assert_eq!(event.outcome, Some(BidOutcome::Declarer(0)));
        assert_eq!(round.best(), Declaration::Two);
        assert!(round.is_finished());
    }

    #[test]
    fn wellington_auto_passes_everyone_else() {
        let (mut field, mut rng) = table(3);
        let mut round = BidRound::with_start(0);

        queue(&mut field, 0, 6);
        let event = round.advance(&mut field, &mut rng).unwrap();
        assert_eq!(event.action, BidAction::Declared(Declaration::Wellington));

        // Nothing queued for seats 1 and 2: pass is their only option.
        let event = round.advance(&mut field, &mut rng).unwrap();
        assert_eq!(event.action, BidAction::AutoPassed);
        let event = round.advance(&mut field, &mut rng).unwrap();
        assert_eq!(event.action, BidAction::AutoPassed);
        assert_eq!(event.outcome, Some(BidOutcome::Declarer(0)));
    }

    #[test]
    fn passed_seat_is_skipped_on_later_rounds() {
        let (mut field, mut rng) = table(3);
        let mut round = BidRound::with_start(0);

        queue(&mut field, 0, 0);
        round.advance(&mut field, &mut rng).unwrap();
        queue(&mut field, 1, 1);
        round.advance(&mut field, &mut rng).unwrap();
        // Over two: [pass, three, misere, four, nap, wellington].
        queue(&mut field, 2, 1);
        round.advance(&mut field, &mut rng).unwrap();
        assert!(!round.is_finished());

        let event = round.advance(&mut field, &mut rng).unwrap();
        assert_eq!(event.seat, 0);
        assert_eq!(event.action, BidAction::Skipped);

        // Over three: [pass, misere, four, nap, wellington].
        queue(&mut field, 1, 0);
        let event = round.advance(&mut field, &mut rng).unwrap();
        assert_eq!(event.outcome, Some(BidOutcome::Declarer(2)));
        assert_eq!(round.best(), Declaration::Three);
    }

    #[test]
    fn rejected_step_keeps_the_seat() {
        let (mut field, mut rng) = table(3);
        let mut round = BidRound::with_start(0);

        // Nothing staged for seat 0: the step fails and the turn stays put.
        let err = round.advance(&mut field, &mut rng).unwrap_err();
        assert_eq!(err, BidError::Decision(DecisionError::NoSelection));
        assert_eq!(round.next_seat(3), 0);

        // An out-of-range selection is rejected the same way.
        queue(&mut field, 0, 99);
        assert!(round.advance(&mut field, &mut rng).is_err());
        assert_eq!(round.next_seat(3), 0);

        // Re-staged, the same seat completes its turn.
        queue(&mut field, 0, 1);
        let event = round.advance(&mut field, &mut rng).unwrap();
        assert_eq!(event.seat, 0);
        assert_eq!(event.action, BidAction::Declared(Declaration::Two));
        assert_eq!(round.next_seat(3), 1);
    }

    #[test]
    fn advance_after_finish_is_rejected() {
        let (mut field, mut rng) = table(2);
        let mut round = BidRound::with_start(0);

        queue(&mut field, 0, 0);
        round.advance(&mut field, &mut rng).unwrap();
        queue(&mut field, 1, 0);
        round.advance(&mut field, &mut rng).unwrap();

        assert_eq!(
            round.advance(&mut field, &mut rng),
            Err(BidError::RoundOver)
        );
    }

    #[test]
    fn random_start_seat_is_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let round = BidRound::new(4, &mut rng);
            assert!(round.next_seat(4) < 4);
        }
    }
}
