use crate::model::card::Card;
use crate::model::field::Field;
use crate::policy::DecisionError;
use core::fmt;
use rand::rngs::StdRng;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickPlay {
    pub seat: usize,
    pub card: Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrickError {
    /// `advance` was called after every seat had played.
    RoundOver,
    Decision(DecisionError),
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::RoundOver => f.write_str("the trick is already complete"),
            TrickError::Decision(err) => write!(f, "play decision failed: {err}"),
        }
    }
}

impl std::error::Error for TrickError {}

impl From<DecisionError> for TrickError {
    fn from(err: DecisionError) -> Self {
        TrickError::Decision(err)
    }
}

/// One trick: a rotation start seat and a play counter. Each `advance` has
/// exactly one seat play one card onto the field.
#[derive(Debug)]
pub struct TrickRound {
    start_seat: usize,
    plays: usize,
}

impl TrickRound {
    pub fn new(start_seat: usize) -> Self {
        Self {
            start_seat,
            plays: 0,
        }
    }

    pub fn next_seat(&self, seat_count: usize) -> usize {
        (self.start_seat + self.plays) % seat_count
    }

    pub fn is_complete(&self, seat_count: usize) -> bool {
        self.plays >= seat_count
    }

    /// Has the next seat play one legal card. With `trump_from_lead` set and
    /// this being the trick's opening play, the played card's suit becomes
    /// the trump (the declarer's lead in the bidding variant; a joker lead
    /// leaves the trump unset).
    pub fn advance(
        &mut self,
        field: &mut Field,
        rng: &mut StdRng,
        trump_from_lead: bool,
    ) -> Result<TrickPlay, TrickError> {
        if self.is_complete(field.seat_count()) {
            return Err(TrickError::RoundOver);
        }

        let seat = self.next_seat(field.seat_count());
        let lead = if field.follow_suit() {
            field.lead()
        } else {
            None
        };

        let card = field.player_mut(seat).play_card(rng, lead)?;
        if trump_from_lead && self.plays == 0 {
            if let Some(suit) = card.suit() {
                field.set_trump(suit);
            }
        }
        field.put_card(seat, card);
        self.plays += 1;
        debug!(seat, %card, "trick play");

        Ok(TrickPlay { seat, card })
    }

    /// The seat holding the strongest in-play card: the unique maximizer of
    /// suit strength under the current trump and lead, then card strength.
    /// No duplicate (rank, suit) exists, so ties cannot occur.
    pub fn winner_seat(&self, field: &Field) -> Option<usize> {
        field
            .plays()
            .iter()
            .max_by_key(|play| {
                (
                    field.suit_strength(play.card.suit()),
                    play.card.strength(),
                )
            })
            .map(|play| play.seat)
    }
}
