#![deny(warnings)]

//! Rules engine for the Napoleon ("Nap") family of trick-taking games.
//!
//! Three variants share one orchestration skeleton: fixed-trump simple
//! tricks, random-trump tricks with suit-following, and the full bidding
//! variant where a declaration round fixes the declarer and the declarer's
//! opening lead fixes the trump. The engine is a pure state machine; all
//! prompting, rendering and persistence live in front-ends that consume
//! [`game::session::Game::advance`] events and [`game::snapshot`] exports.

pub mod game;
pub mod model;
pub mod policy;

pub use game::rules::GameRules;
pub use game::session::{Game, GameError, GameEvent, GameOutcome};
