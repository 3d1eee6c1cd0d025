use crate::model::card::Card;
use crate::model::declaration::Declaration;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use crate::policy::{DecisionContext, DecisionError, DecisionPolicy, QueuedPolicy, RandomPolicy};
use core::fmt;
use rand::rngs::StdRng;

/// How much of a hand is shown to the table. A reveal policy is data on the
/// player, not a subclass per character: flavor NPCs that leak one card's
/// suit or rank are just CPU players with a different policy value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPolicy {
    /// The whole hand, face up (humans see their own cards).
    Open,
    /// Every card redacted.
    Hidden,
    /// First card's suit revealed, nothing else.
    SuitHint,
    /// First card's rank revealed, nothing else.
    RankHint,
}

/// One card as shown to the table after redaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardView {
    Face(Card),
    Back,
    SuitOnly(Option<Suit>),
    RankOnly(Option<Rank>),
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardView::Face(card) => write!(f, "{card}"),
            CardView::Back => f.write_str("?"),
            CardView::SuitOnly(Some(suit)) => write!(f, "? {suit}"),
            CardView::RankOnly(Some(rank)) => write!(f, "{rank} ?"),
            CardView::SuitOnly(None) | CardView::RankOnly(None) => f.write_str("?"),
        }
    }
}

/// A seat at the table: identity, hand, running point total, current
/// declaration and an injected decision provider.
#[derive(Debug)]
pub struct Player {
    name: String,
    cpu: bool,
    reveal: RevealPolicy,
    policy: Box<dyn DecisionPolicy>,
    hand: Hand,
    points: i32,
    declaration: Declaration,
}

impl Player {
    pub fn new(
        name: impl Into<String>,
        cpu: bool,
        reveal: RevealPolicy,
        policy: Box<dyn DecisionPolicy>,
    ) -> Self {
        Self {
            name: name.into(),
            cpu,
            reveal,
            policy,
            hand: Hand::new(),
            points: 0,
            declaration: Declaration::NoDeclare,
        }
    }

    /// A random-choosing CPU with a hidden hand.
    pub fn cpu(name: impl Into<String>) -> Self {
        Self::new(name, true, RevealPolicy::Hidden, Box::new(RandomPolicy))
    }

    /// A human seat driven by externally staged selections.
    pub fn human(name: impl Into<String>) -> Self {
        Self::new(
            name,
            false,
            RevealPolicy::Open,
            Box::new(QueuedPolicy::new()),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_cpu(&self) -> bool {
        self.cpu
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn points(&self) -> i32 {
        self.points
    }

    pub fn add_points(&mut self, delta: i32) {
        self.points += delta;
    }

    pub fn declaration(&self) -> Declaration {
        self.declaration
    }

    pub fn set_declaration(&mut self, declaration: Declaration) {
        self.declaration = declaration;
    }

    /// Replaces the hand at deal time; the hand arrives sorted.
    pub fn take_hand(&mut self, cards: Vec<Card>) {
        self.hand = Hand::with_cards(cards);
    }

    /// Legal cards under the suit-following rule.
    pub fn playable(&self, lead: Option<Suit>) -> Vec<Card> {
        self.hand.playable(lead)
    }

    /// Asks the decision provider for a card and removes it from the hand.
    /// A choice outside the legal subset is rejected before any mutation.
    pub fn play_card(
        &mut self,
        rng: &mut StdRng,
        lead: Option<Suit>,
    ) -> Result<Card, DecisionError> {
        let legal = self.hand.playable(lead);
        let card = {
            let mut ctx = DecisionContext { rng };
            self.policy.choose_card(&mut ctx, self.hand.cards(), &legal)?
        };
        if !legal.contains(&card) {
            return Err(DecisionError::NotPlayable(card));
        }
        self.hand.remove(card);
        Ok(card)
    }

    /// Asks the decision provider for a declaration and records it.
    pub fn declare(
        &mut self,
        rng: &mut StdRng,
        candidates: &[Declaration],
    ) -> Result<Declaration, DecisionError> {
        let declaration = {
            let mut ctx = DecisionContext { rng };
            self.policy.choose_declaration(&mut ctx, candidates)?
        };
        if !candidates.contains(&declaration) {
            return Err(DecisionError::NotDeclarable(declaration));
        }
        self.declaration = declaration;
        Ok(declaration)
    }

    pub fn queue_card(&mut self, index: usize) -> bool {
        self.policy.queue_card(index)
    }

    pub fn queue_declaration(&mut self, index: usize) -> bool {
        self.policy.queue_declaration(index)
    }

    /// The hand as the table sees it, after the reveal policy is applied.
    pub fn show_hand(&self) -> Vec<CardView> {
        let views = |first: fn(Card) -> CardView| -> Vec<CardView> {
            self.hand
                .iter()
                .enumerate()
                .map(|(position, &card)| {
                    if position == 0 {
                        first(card)
                    } else {
                        CardView::Back
                    }
                })
                .collect()
        };

        match self.reveal {
            RevealPolicy::Open => self.hand.iter().map(|&card| CardView::Face(card)).collect(),
            RevealPolicy::Hidden => self.hand.iter().map(|_| CardView::Back).collect(),
            RevealPolicy::SuitHint => views(|card| CardView::SuitOnly(card.suit())),
            RevealPolicy::RankHint => views(|card| CardView::RankOnly(card.rank())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CardView, Player, RevealPolicy};
    use crate::model::card::Card;
    use crate::model::declaration::Declaration;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use crate::policy::{DecisionError, QueuedPolicy, RandomPolicy};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dealt(mut player: Player) -> Player {
        player.take_hand(vec![
            Card::new(Rank::Two, Suit::Club),
            Card::new(Rank::Nine, Suit::Heart),
            Card::new(Rank::Ace, Suit::Spade),
        ]);
        player
    }

    #[test]
    fn cpu_plays_a_legal_card() {
        let mut player = dealt(Player::cpu("Boss"));
        let mut rng = StdRng::seed_from_u64(1);
        let card = player.play_card(&mut rng, Some(Suit::Heart)).unwrap();
        assert_eq!(card, Card::new(Rank::Nine, Suit::Heart));
        assert_eq!(player.hand().len(), 2);
    }

    #[test]
    fn queued_play_consumes_staged_index() {
        let mut player = dealt(Player::human("You"));
        let mut rng = StdRng::seed_from_u64(1);

        assert!(player.queue_card(0));
        let card = player.play_card(&mut rng, None).unwrap();
        assert_eq!(card, Card::new(Rank::Two, Suit::Club));
        assert_eq!(
            player.play_card(&mut rng, None),
            Err(DecisionError::NoSelection)
        );
    }

    #[test]
    fn illegal_queued_play_leaves_hand_intact() {
        let mut player = dealt(Player::human("You"));
        let mut rng = StdRng::seed_from_u64(1);

        player.queue_card(0);
        let result = player.play_card(&mut rng, Some(Suit::Heart));
        assert_eq!(
            result,
            Err(DecisionError::NotPlayable(Card::new(Rank::Two, Suit::Club)))
        );
        assert_eq!(player.hand().len(), 3);
    }

    #[test]
    fn declare_records_the_declaration() {
        let mut player = dealt(Player::human("You"));
        let mut rng = StdRng::seed_from_u64(1);
        let candidates = Declaration::NoDeclare.declarable_list();

        player.queue_declaration(1);
        let declaration = player.declare(&mut rng, &candidates).unwrap();
        assert_eq!(declaration, Declaration::Two);
        assert_eq!(player.declaration(), Declaration::Two);
    }

    #[test]
    fn hidden_hand_shows_only_backs() {
        let player = dealt(Player::cpu("Boss"));
        let views = player.show_hand();
        assert_eq!(views.len(), 3);
        assert!(views.iter().all(|view| *view == CardView::Back));
    }

    #[test]
    fn open_hand_shows_faces() {
        let player = dealt(Player::human("You"));
        let views = player.show_hand();
        assert_eq!(views[0], CardView::Face(Card::new(Rank::Two, Suit::Club)));
    }

    #[test]
    fn suit_hint_reveals_only_first_suit() {
        let player = dealt(Player::new(
            "Takeshi",
            true,
            RevealPolicy::SuitHint,
            Box::new(RandomPolicy),
        ));
        let views = player.show_hand();
        assert_eq!(views[0], CardView::SuitOnly(Some(Suit::Club)));
        assert_eq!(views[1], CardView::Back);
        assert_eq!(views[0].to_string(), "? ♣");
    }

    #[test]
    fn rank_hint_reveals_only_first_rank() {
        let player = dealt(Player::new(
            "Shizuka",
            true,
            RevealPolicy::RankHint,
            Box::new(QueuedPolicy::new()),
        ));
        let views = player.show_hand();
        assert_eq!(views[0], CardView::RankOnly(Some(Rank::Two)));
        assert_eq!(views[0].to_string(), "2 ?");
    }
}
