//! # cribbage-engine
//!
//! A deterministic rules engine for 2, 3 and 4 player cribbage.
//!
//! ## Design Principles
//!
//! 1. **Blockers Drive Play**: A game records who must act and why. Every
//!    action names the blocker it resolves, and anything else is rejected.
//!
//! 2. **Authoritative Scoring**: Hands, cribs and pegging are always scored
//!    by the engine. Claimed counts are checked, reported, and ignored.
//!
//! 3. **Ordered History**: Each successful action appends one entry to the
//!    game's log, and stores only accept the next version in sequence.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: The action log, blocking set and pegged
//!   cards are `im-rs` structures shared between clones. Only the bounded
//!   deck, hands and crib are copied, so an action is applied to a clone and
//!   committed only on success.
//!
//! - **Deterministic RNG**: Shuffles come from a ChaCha generator whose state
//!   travels with the game, so a stored snapshot replays identically.
//!
//! ## Modules
//!
//! - `core`: Ids, seats, colors, RNG, configuration, actions, game state, errors
//! - `cards`: Cards and the deck
//! - `subsets`: Fixed-size subset enumeration
//! - `scoring`: Hand, crib and pegging scores
//! - `rules`: The game state machine
//! - `strategy`: Discard advice and computer players
//! - `store`: Storage and notification traits, in-memory store
//! - `service`: Load, apply, save, notify, and let computer players move

pub mod core;
pub mod cards;
pub mod subsets;
pub mod scoring;
pub mod rules;
pub mod strategy;
pub mod store;
pub mod service;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, Player, Seat, SeatMap, PlayerColor, ColorMap,
    GameRng, GameRngState,
    GameConfig, WINNING_SCORE,
    ActionPayload, Blocker, PlayerAction,
    Game, GameId, PeggedCard, Phase, MAX_PEG_COUNT,
    EngineError, Missing, Result,
};

pub use crate::cards::{parse_cards, Card, Deck, Suit, DECK_SIZE};

pub use crate::subsets::{binomial, Combinations};

pub use crate::scoring::{
    crib_points, hand_points, score_crib, score_hand, score_peg, PegScore, ScoreBreakdown,
};

pub use crate::rules::{apply_action, GameEvent, ScoreReason, Transition};

pub use crate::strategy::{best_discard, Discard, Mode, Npc};

pub use crate::store::{GameStore, MemoryStore, Notifier, NullNotifier};

pub use crate::service::{GameService, ServiceConfig};
