//! Headless match simulator: runs seeded Nap matches to completion and
//! reports their outcomes, optionally dumping the final table as JSON.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nap_core::model::player::Player;
use nap_core::{Game, GameOutcome, GameRules};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    /// Fixed spade trump, 3-card hands, no suit-following.
    Simple,
    /// Random trump, 5-card hands, suit-following.
    Easy,
    /// Bidding, trump from the declarer's lead, contract scoring.
    Napoleon,
}

impl Variant {
    fn rules(self) -> GameRules {
        match self {
            Variant::Simple => GameRules::simple(),
            Variant::Easy => GameRules::easy(),
            Variant::Napoleon => GameRules::napoleon(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "nap-sim", about = "Headless Nap match simulator")]
struct Cli {
    /// Rule variant to play.
    #[arg(long, value_enum, default_value_t = Variant::Napoleon)]
    variant: Variant,

    /// Seats at the table.
    #[arg(long, default_value_t = 4)]
    players: usize,

    /// Matches to run.
    #[arg(long, default_value_t = 1)]
    games: u64,

    /// Base RNG seed; match i plays with seed + i. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Print each match's final table snapshot as JSON.
    #[arg(long)]
    json: bool,
}

fn roster(seats: usize) -> Vec<Player> {
    (0..seats).map(|seat| Player::cpu(format!("cpu {seat}"))).collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let base_seed = cli.seed.unwrap_or_else(rand::random);
    info!(variant = ?cli.variant, games = cli.games, base_seed, "starting simulation");

    let mut seat_wins = vec![0u64; cli.players];
    let mut contracts_made = 0u64;
    let mut contracts_failed = 0u64;
    let mut no_contracts = 0u64;

    for index in 0..cli.games {
        let players = roster(cli.players);
        let mut game = Game::with_seed(cli.variant.rules(), players, base_seed + index)
            .context("failed to set up the match")?;

        let outcome = game
            .play_to_end()
            .with_context(|| format!("match {index} (seed {}) did not finish", game.seed()))?;
        println!("match {index} (seed {}): {outcome}", game.seed());

        match outcome {
            GameOutcome::TrickCount { winner, .. } => seat_wins[winner] += 1,
            GameOutcome::Contract { achieved: true, declarer, .. } => {
                contracts_made += 1;
                seat_wins[declarer] += 1;
            }
            GameOutcome::Contract { achieved: false, .. } => contracts_failed += 1,
            GameOutcome::NoContract => no_contracts += 1,
        }

        if cli.json {
            let snapshot = serde_json::to_string_pretty(&game.snapshot())
                .context("failed to encode the snapshot")?;
            println!("{snapshot}");
        }
    }

    println!("--");
    if cli.variant == Variant::Napoleon {
        println!(
            "contracts: {contracts_made} made, {contracts_failed} failed, {no_contracts} all-pass"
        );
    }
    for (seat, wins) in seat_wins.iter().enumerate() {
        println!("seat {seat}: {wins} wins");
    }
    Ok(())
}
