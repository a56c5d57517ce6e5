//! Engine error type.
//!
//! Every failure the engine can report is synchronous and local. Nothing is
//! retried inside the crate; retrying against refreshed state is the caller's
//! job.

use thiserror::Error;

use super::action::Blocker;
use super::player::PlayerId;
use super::state::GameId;

/// What could not be found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Missing {
    Game(GameId),
    Player(PlayerId),
    /// A game exists but has no snapshot after this many actions.
    Version(GameId, usize),
}

impl std::fmt::Display for Missing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Missing::Game(id) => write!(f, "{id}"),
            Missing::Player(id) => write!(f, "{id}"),
            Missing::Version(id, n) => write!(f, "{id} after {n} actions"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    /// The actor is not blocked, or is blocked for a different reason.
    #[error("{player} cannot act to {declared:?} (blocked for {expected:?})")]
    InvalidBlocker {
        player: PlayerId,
        declared: Blocker,
        expected: Option<Blocker>,
    },

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// A claimed count differed from the recomputed one. Reported, never fatal.
    #[error("{player} claimed {claimed} points but the count is {actual}")]
    ScoreMismatch {
        player: PlayerId,
        claimed: u8,
        actual: u8,
    },

    #[error("{0} is over")]
    GameOver(GameId),

    #[error("{game} has {stored} stored actions, cannot save action {attempted}")]
    OutOfOrder {
        game: GameId,
        stored: usize,
        attempted: usize,
    },

    #[error("{0} not found")]
    NotFound(Missing),

    #[error("{0} already exists")]
    DuplicatePlayer(PlayerId),

    #[error("cannot draw {requested} cards from a deck of {remaining}")]
    EmptyDeck { requested: usize, remaining: usize },

    #[error("cannot choose {k} of {n} items")]
    InvalidArity { n: usize, k: usize },

    #[error("snapshot codec: {0}")]
    Codec(String),
}

impl EngineError {
    pub fn invalid_payload(detail: impl Into<String>) -> Self {
        Self::InvalidPayload(detail.into())
    }
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        Self::Codec(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
