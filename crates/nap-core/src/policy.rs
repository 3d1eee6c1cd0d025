use crate::model::card::Card;
use crate::model::declaration::Declaration;
use core::fmt;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Everything a decision provider may consult beyond the choice at hand.
/// Carries the single match RNG so every random effect stays seedable.
pub struct DecisionContext<'a> {
    pub rng: &'a mut StdRng,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionError {
    /// A queued policy was asked to act with no selection staged.
    NoSelection,
    /// A staged selection pointed outside the choice list.
    OutOfRange { index: usize, len: usize },
    /// The selected card violates the suit-following rule.
    NotPlayable(Card),
    /// The selected declaration is not callable over the current best.
    NotDeclarable(Declaration),
    /// The legal choice list was empty.
    EmptyChoice,
}

impl fmt::Display for DecisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionError::NoSelection => f.write_str("no selection has been queued"),
            DecisionError::OutOfRange { index, len } => {
                write!(f, "selection index {index} is out of range for {len} choices")
            }
            DecisionError::NotPlayable(card) => write!(f, "{card} cannot be played now"),
            DecisionError::NotDeclarable(declaration) => {
                write!(f, "{declaration} cannot be declared now")
            }
            DecisionError::EmptyChoice => f.write_str("there is nothing to choose from"),
        }
    }
}

impl std::error::Error for DecisionError {}

/// Uniform decision seam: the same player type serves CPUs, scripted tests
/// and event-driven front-ends by swapping the provider, never by branching
/// on a mode inside the engine.
pub trait DecisionPolicy: fmt::Debug {
    /// Picks a card. `hand` is the player's full sorted hand; `legal` is the
    /// subset the suit-following rule allows right now.
    fn choose_card(
        &mut self,
        ctx: &mut DecisionContext<'_>,
        hand: &[Card],
        legal: &[Card],
    ) -> Result<Card, DecisionError>;

    /// Picks a declaration from the callable candidates.
    fn choose_declaration(
        &mut self,
        ctx: &mut DecisionContext<'_>,
        candidates: &[Declaration],
    ) -> Result<Declaration, DecisionError>;

    /// Stages a hand index for the next card choice. Returns false when the
    /// provider does not take external selections.
    fn queue_card(&mut self, _index: usize) -> bool {
        false
    }

    /// Stages a candidate index for the next declaration choice.
    fn queue_declaration(&mut self, _index: usize) -> bool {
        false
    }
}

/// CPU provider: uniform random choice among the legal options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl DecisionPolicy for RandomPolicy {
    fn choose_card(
        &mut self,
        ctx: &mut DecisionContext<'_>,
        _hand: &[Card],
        legal: &[Card],
    ) -> Result<Card, DecisionError> {
        legal
            .choose(ctx.rng)
            .copied()
            .ok_or(DecisionError::EmptyChoice)
    }

    fn choose_declaration(
        &mut self,
        ctx: &mut DecisionContext<'_>,
        candidates: &[Declaration],
    ) -> Result<Declaration, DecisionError> {
        candidates
            .choose(ctx.rng)
            .copied()
            .ok_or(DecisionError::EmptyChoice)
    }
}

/// Event-driven provider: an external caller stages at most one selection,
/// which is consumed exactly once. Illegal selections are rejected, never
/// corrected, so the caller can re-stage and advance again.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueuedPolicy {
    card_selection: Option<usize>,
    declaration_selection: Option<usize>,
}

impl QueuedPolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DecisionPolicy for QueuedPolicy {
    fn choose_card(
        &mut self,
        _ctx: &mut DecisionContext<'_>,
        hand: &[Card],
        legal: &[Card],
    ) -> Result<Card, DecisionError> {
        let index = self.card_selection.take().ok_or(DecisionError::NoSelection)?;
        let card = *hand.get(index).ok_or(DecisionError::OutOfRange {
            index,
            len: hand.len(),
        })?;
        if !legal.contains(&card) {
            return Err(DecisionError::NotPlayable(card));
        }
        Ok(card)
    }

    fn choose_declaration(
        &mut self,
        _ctx: &mut DecisionContext<'_>,
        candidates: &[Declaration],
    ) -> Result<Declaration, DecisionError> {
        let index = self
            .declaration_selection
            .take()
            .ok_or(DecisionError::NoSelection)?;
        candidates
            .get(index)
            .copied()
            .ok_or(DecisionError::OutOfRange {
                index,
                len: candidates.len(),
            })
    }

    fn queue_card(&mut self, index: usize) -> bool {
        self.card_selection = Some(index);
        true
    }

    fn queue_declaration(&mut self, index: usize) -> bool {
        self.declaration_selection = Some(index);
        true
    }
}
