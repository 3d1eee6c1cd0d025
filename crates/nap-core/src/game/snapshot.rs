use crate::game::session::Game;
use crate::model::declaration::Declaration;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

/// One seat as a front-end may show it: the hand is pre-redacted through
/// the player's reveal policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub hand: Vec<String>,
    pub points: i32,
    pub declaration: Declaration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaySnapshot {
    pub name: String,
    pub card: String,
}

/// Flat, renderable export of the table. Card text uses the same rendering
/// as the engine's events; exact layout is the front-end's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub widow_count: usize,
    pub deck_remaining: usize,
    pub trash_count: usize,
    pub in_play: Vec<PlaySnapshot>,
    pub trump: Option<Suit>,
    pub lead: Option<Suit>,
    pub players: Vec<PlayerSnapshot>,
    pub message: Option<String>,
}

impl FieldSnapshot {
    pub fn capture(game: &Game) -> Self {
        let field = game.field();
        Self {
            widow_count: field.widow().len(),
            deck_remaining: field.deck().len(),
            trash_count: field.trash().len(),
            in_play: field
                .plays()
                .iter()
                .map(|play| PlaySnapshot {
                    name: field.player(play.seat).name().to_string(),
                    card: play.card.to_string(),
                })
                .collect(),
            trump: field.trump(),
            lead: field.lead(),
            players: field
                .players()
                .iter()
                .map(|player| PlayerSnapshot {
                    name: player.name().to_string(),
                    hand: player
                        .show_hand()
                        .iter()
                        .map(|view| view.to_string())
                        .collect(),
                    points: player.points(),
                    declaration: player.declaration(),
                })
                .collect(),
            message: game.last_message().map(str::to_string),
        }
    }
}

impl Game {
    /// Exports the current table for rendering or inspection.
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::FieldSnapshot;
    use crate::game::rules::GameRules;
    use crate::game::session::Game;
    use crate::model::declaration::Declaration;
    use crate::model::player::Player;
    use crate::model::suit::Suit;

    fn game() -> Game {
        Game::with_seed(
            GameRules::simple(),
            vec![Player::human("You"), Player::cpu("Boss")],
            7,
        )
        .unwrap()
    }

    #[test]
    fn snapshot_reflects_the_fresh_deal() {
        let snapshot = game().snapshot();
        assert_eq!(snapshot.deck_remaining, 46);
        assert_eq!(snapshot.widow_count, 0);
        assert_eq!(snapshot.trash_count, 0);
        assert!(snapshot.in_play.is_empty());
        assert_eq!(snapshot.trump, Some(Suit::Spade));
        assert_eq!(snapshot.lead, None);
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.players[0].declaration, Declaration::NoDeclare);
        assert!(snapshot.message.is_none());
    }

    #[test]
    fn cpu_hands_are_redacted_and_human_hands_are_not() {
        let snapshot = game().snapshot();
        assert!(snapshot.players[0].hand.iter().all(|card| card != "?"));
        assert!(snapshot.players[1].hand.iter().all(|card| card == "?"));
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut game = game();
        game.advance().unwrap();
        let snapshot = game.snapshot();
        assert!(snapshot.message.is_some());

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: FieldSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
