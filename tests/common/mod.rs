//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::OnceLock;

use cribbage_engine::core::{Game, GameConfig, GameId, GameRng, Player, PlayerId};
use cribbage_engine::rules::{apply_action, Transition};
use cribbage_engine::strategy::{Mode, Npc};
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceLock<()> = OnceLock::new();

/// Install a test subscriber once. `TEST_LOG` or `RUST_LOG` pick the level,
/// defaulting to `warn`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn players(n: u64) -> Vec<Player> {
    (1..=n)
        .map(|i| Player::new(PlayerId(i), format!("player{i}")))
        .collect()
}

pub fn new_game(n: u64, seed: u64) -> Game {
    Game::new(GameId(1), players(n), GameConfig::default(), seed).unwrap()
}

/// Let the first blocked player act as an NPC. Returns `None` once nobody is
/// blocked.
pub fn npc_step(game: &mut Game, mode: Mode, rng: &mut GameRng) -> Option<Transition> {
    let (seat, _) = game.blocking().next()?;
    let player = game.player(seat).id;
    let action = Npc::new(mode, game.color(seat))
        .build_action(game, player, rng)
        .unwrap()?;
    Some(apply_action(game, &action).unwrap())
}

/// Play NPC moves until `done` holds or nobody is blocked.
pub fn play_until(
    game: &mut Game,
    mode: Mode,
    rng: &mut GameRng,
    mut done: impl FnMut(&Game) -> bool,
) -> Vec<Transition> {
    let mut transitions = Vec::new();
    while !done(game) {
        match npc_step(game, mode, rng) {
            Some(t) => transitions.push(t),
            None => break,
        }
    }
    transitions
}
