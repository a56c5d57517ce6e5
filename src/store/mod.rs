//! Persistence and notification seams.
//!
//! ## Ordering contract
//!
//! Every stored game version is indexed by its action count. A save is
//! accepted only when it extends the stored history by exactly one action
//! (or creates a game with no actions). Anything else fails with
//! `OutOfOrder`, which is how two writers racing on the same game are
//! detected: the second one loses.
//!
//! The check and the append happen under one lock, so concurrent saves can
//! never both succeed for the same version.

mod memory;
mod notify;

pub use memory::MemoryStore;
pub use notify::{Notifier, NullNotifier};

use crate::core::{Game, GameId, Player, PlayerColor, PlayerId, Result};

/// Game and player storage.
pub trait GameStore: Send + Sync {
    /// Latest version of a game.
    fn get(&self, id: GameId) -> Result<Game>;

    /// The game as it stood after `version` actions.
    fn get_at_version(&self, id: GameId, version: usize) -> Result<Game>;

    /// Append the next version. See the ordering contract above.
    fn save(&self, game: &Game) -> Result<()>;

    fn create_player(&self, player: Player) -> Result<()>;

    fn get_player(&self, id: PlayerId) -> Result<Player>;

    /// Record that `player` plays `color` in `game`.
    fn add_player_to_game(&self, player: PlayerId, color: PlayerColor, game: GameId) -> Result<()>;

    /// Games `player` has joined and their color in each, by game id.
    fn games_for(&self, player: PlayerId) -> Result<Vec<(GameId, PlayerColor)>>;
}
