//! Player actions.
//!
//! An action names the blocker it resolves and carries a payload. The payload
//! is a tagged union with one variant per kind of decision; the engine matches
//! it exhaustively and rejects a payload that does not answer the declared
//! blocker.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use super::state::GameId;
use crate::cards::Card;

/// Why a player is currently required to act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Blocker {
    DealCards,
    CribCard,
    CutCard,
    PegCard,
    CountHand,
    CountCrib,
}

impl std::fmt::Display for Blocker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self {
            Blocker::DealCards => "deal the cards",
            Blocker::CribCard => "discard to the crib",
            Blocker::CutCard => "cut the deck",
            Blocker::PegCard => "peg a card",
            Blocker::CountHand => "count your hand",
            Blocker::CountCrib => "count the crib",
        };
        f.write_str(what)
    }
}

/// What the player decided.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActionPayload {
    /// Shuffle `shuffles` times and deal.
    Deal { shuffles: u32 },
    /// Discard these cards to the crib.
    BuildCrib { cards: SmallVec<[Card; 2]> },
    /// Cut at this fraction of the remaining deck, in `[0, 1)`.
    Cut { percentage: f64 },
    /// Play a card onto the pegging count.
    Peg { card: Card },
    /// No held card keeps the count at or under 31.
    Go,
    /// Claimed points for the player's hand. Advisory only.
    CountHand { points: u8 },
    /// Claimed points for the crib. Advisory only.
    CountCrib { points: u8 },
}

impl ActionPayload {
    /// The blocker this payload answers.
    #[must_use]
    pub fn blocker(&self) -> Blocker {
        match self {
            ActionPayload::Deal { .. } => Blocker::DealCards,
            ActionPayload::BuildCrib { .. } => Blocker::CribCard,
            ActionPayload::Cut { .. } => Blocker::CutCard,
            ActionPayload::Peg { .. } | ActionPayload::Go => Blocker::PegCard,
            ActionPayload::CountHand { .. } => Blocker::CountHand,
            ActionPayload::CountCrib { .. } => Blocker::CountCrib,
        }
    }
}

/// A complete action submitted against a game.
///
/// ```
/// use cribbage_engine::core::{ActionPayload, Blocker, GameId, PlayerAction, PlayerId};
///
/// let deal = PlayerAction::new(GameId(1), PlayerId(10), ActionPayload::Deal { shuffles: 3 });
/// assert_eq!(deal.overcomes, Blocker::DealCards);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerAction {
    pub game: GameId,
    pub player: PlayerId,
    pub overcomes: Blocker,
    pub payload: ActionPayload,
}

impl PlayerAction {
    /// Build an action whose declared blocker matches its payload.
    #[must_use]
    pub fn new(game: GameId, player: PlayerId, payload: ActionPayload) -> Self {
        Self {
            game,
            player,
            overcomes: payload.blocker(),
            payload,
        }
    }

    pub fn deal(game: GameId, player: PlayerId, shuffles: u32) -> Self {
        Self::new(game, player, ActionPayload::Deal { shuffles })
    }

    pub fn build_crib(game: GameId, player: PlayerId, cards: &[Card]) -> Self {
        Self::new(
            game,
            player,
            ActionPayload::BuildCrib {
                cards: SmallVec::from_slice(cards),
            },
        )
    }

    pub fn cut(game: GameId, player: PlayerId, percentage: f64) -> Self {
        Self::new(game, player, ActionPayload::Cut { percentage })
    }

    pub fn peg(game: GameId, player: PlayerId, card: Card) -> Self {
        Self::new(game, player, ActionPayload::Peg { card })
    }

    pub fn go(game: GameId, player: PlayerId) -> Self {
        Self::new(game, player, ActionPayload::Go)
    }

    pub fn count_hand(game: GameId, player: PlayerId, points: u8) -> Self {
        Self::new(game, player, ActionPayload::CountHand { points })
    }

    pub fn count_crib(game: GameId, player: PlayerId, points: u8) -> Self {
        Self::new(game, player, ActionPayload::CountCrib { points })
    }
}
