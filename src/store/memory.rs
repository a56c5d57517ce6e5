//! In-memory store.
//!
//! Keeps every version of every game as a bincode snapshot. Snapshots are
//! encoded outside the lock; the ordering check and the append run inside it.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::GameStore;
use crate::core::{EngineError, Game, GameId, Missing, Player, PlayerColor, PlayerId, Result};

#[derive(Debug)]
struct PlayerRecord {
    player: Player,
    games: FxHashMap<GameId, PlayerColor>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    games: Mutex<FxHashMap<GameId, Vec<Vec<u8>>>>,
    players: Mutex<FxHashMap<PlayerId, PlayerRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored versions of a game (0 if unknown).
    #[must_use]
    pub fn version_count(&self, id: GameId) -> usize {
        self.games.lock().get(&id).map_or(0, Vec::len)
    }

    fn snapshot(&self, id: GameId, version: Option<usize>) -> Result<Game> {
        let bytes = {
            let games = self.games.lock();
            let versions = games
                .get(&id)
                .ok_or(EngineError::NotFound(Missing::Game(id)))?;
            let found = match version {
                Some(v) => versions.get(v),
                None => versions.last(),
            };
            found
                .ok_or(EngineError::NotFound(Missing::Version(
                    id,
                    version.unwrap_or_default(),
                )))?
                .clone()
        };
        Ok(bincode::deserialize(&bytes)?)
    }
}

impl GameStore for MemoryStore {
    fn get(&self, id: GameId) -> Result<Game> {
        self.snapshot(id, None)
    }

    fn get_at_version(&self, id: GameId, version: usize) -> Result<Game> {
        self.snapshot(id, Some(version))
    }

    fn save(&self, game: &Game) -> Result<()> {
        let bytes = bincode::serialize(game)?;
        let attempted = game.num_actions();

        let mut games = self.games.lock();
        let stored = games.get(&game.id).map_or(0, Vec::len);
        if stored != attempted {
            warn!(
                game_id = game.id.0,
                stored_versions = stored,
                attempted,
                "Rejected out-of-order save"
            );
            return Err(EngineError::OutOfOrder {
                game: game.id,
                stored: stored.saturating_sub(1),
                attempted,
            });
        }

        games.entry(game.id).or_default().push(bytes);
        debug!(game_id = game.id.0, version = attempted, "Saved game");
        Ok(())
    }

    fn create_player(&self, player: Player) -> Result<()> {
        let mut players = self.players.lock();
        if players.contains_key(&player.id) {
            return Err(EngineError::DuplicatePlayer(player.id));
        }
        players.insert(
            player.id,
            PlayerRecord {
                player,
                games: FxHashMap::default(),
            },
        );
        Ok(())
    }

    fn get_player(&self, id: PlayerId) -> Result<Player> {
        self.players
            .lock()
            .get(&id)
            .map(|record| record.player.clone())
            .ok_or(EngineError::NotFound(Missing::Player(id)))
    }

    fn add_player_to_game(&self, player: PlayerId, color: PlayerColor, game: GameId) -> Result<()> {
        let mut players = self.players.lock();
        let record = players
            .get_mut(&player)
            .ok_or(EngineError::NotFound(Missing::Player(player)))?;
        record.games.insert(game, color);
        debug!(player = player.0, game_id = game.0, %color, "Added player to game");
        Ok(())
    }

    fn games_for(&self, player: PlayerId) -> Result<Vec<(GameId, PlayerColor)>> {
        let players = self.players.lock();
        let record = players
            .get(&player)
            .ok_or(EngineError::NotFound(Missing::Player(player)))?;
        let mut games: Vec<_> = record.games.iter().map(|(&id, &color)| (id, color)).collect();
        games.sort_unstable_by_key(|&(id, _)| id);
        Ok(games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn new_game() -> Game {
        let players = vec![
            Player::new(PlayerId(1), "alice"),
            Player::new(PlayerId(2), "bob"),
        ];
        Game::new(GameId(4), players, GameConfig::default(), 1).unwrap()
    }

    #[test]
    fn test_first_save_and_get() {
        let store = MemoryStore::new();
        let game = new_game();
        store.save(&game).unwrap();

        assert_eq!(store.get(GameId(4)).unwrap(), game);
        assert_eq!(store.get_at_version(GameId(4), 0).unwrap(), game);
        assert_eq!(store.version_count(GameId(4)), 1);
    }

    #[test]
    fn test_resaving_same_version_is_out_of_order() {
        let store = MemoryStore::new();
        let game = new_game();
        store.save(&game).unwrap();

        let err = store.save(&game).unwrap_err();
        assert_eq!(
            err,
            EngineError::OutOfOrder {
                game: GameId(4),
                stored: 0,
                attempted: 0,
            }
        );
        assert_eq!(store.version_count(GameId(4)), 1);
    }

    #[test]
    fn test_missing_game_and_version() {
        let store = MemoryStore::new();
        assert_eq!(
            store.get(GameId(9)).unwrap_err(),
            EngineError::NotFound(Missing::Game(GameId(9)))
        );

        store.save(&new_game()).unwrap();
        assert_eq!(
            store.get_at_version(GameId(4), 3).unwrap_err(),
            EngineError::NotFound(Missing::Version(GameId(4), 3))
        );
    }

    #[test]
    fn test_player_directory() {
        let store = MemoryStore::new();
        store.create_player(Player::new(PlayerId(7), "carol")).unwrap();

        assert_eq!(store.get_player(PlayerId(7)).unwrap().name, "carol");
        assert_eq!(
            store.create_player(Player::new(PlayerId(7), "again")),
            Err(EngineError::DuplicatePlayer(PlayerId(7)))
        );
        assert_eq!(
            store.get_player(PlayerId(8)).unwrap_err(),
            EngineError::NotFound(Missing::Player(PlayerId(8)))
        );
    }

    #[test]
    fn test_games_for_player() {
        let store = MemoryStore::new();
        store.create_player(Player::new(PlayerId(1), "alice")).unwrap();
        assert!(store.games_for(PlayerId(1)).unwrap().is_empty());

        store
            .add_player_to_game(PlayerId(1), PlayerColor::Red, GameId(9))
            .unwrap();
        store
            .add_player_to_game(PlayerId(1), PlayerColor::Blue, GameId(3))
            .unwrap();

        assert_eq!(
            store.games_for(PlayerId(1)).unwrap(),
            vec![(GameId(3), PlayerColor::Blue), (GameId(9), PlayerColor::Red)]
        );
    }

    #[test]
    fn test_games_for_unknown_player() {
        let store = MemoryStore::new();
        assert_eq!(
            store.add_player_to_game(PlayerId(5), PlayerColor::Red, GameId(1)),
            Err(EngineError::NotFound(Missing::Player(PlayerId(5))))
        );
        assert_eq!(
            store.games_for(PlayerId(5)).unwrap_err(),
            EngineError::NotFound(Missing::Player(PlayerId(5)))
        );
    }
}
