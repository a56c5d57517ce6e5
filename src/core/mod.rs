//! Core engine types: ids, seats, colors, RNG, configuration, actions, game
//! state and errors.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use player::{ColorMap, Player, PlayerColor, PlayerId, Seat, SeatMap};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, WINNING_SCORE};
pub use action::{ActionPayload, Blocker, PlayerAction};
pub use state::{Game, GameId, PeggedCard, Phase, MAX_PEG_COUNT};
pub use error::{EngineError, Missing, Result};
