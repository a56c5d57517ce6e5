//! Game orchestration.
//!
//! `GameService` ties the pieces together: it loads a game from the injected
//! store, applies an action, saves the result under the ordering contract,
//! notifies players, and then lets any computer players answer their
//! blockers.
//!
//! The service does not serialize actions per game. Two callers racing on
//! one game both apply against the same stored version; the store accepts
//! the first save and rejects the second with `OutOfOrder`.
//!
//! Once a caller's own action is saved, the call succeeds. Computer players
//! that lose a race reload the game and try again; other failures on their
//! turn are logged and leave the game waiting on them.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{
    EngineError, Game, GameConfig, GameId, GameRng, Player, PlayerAction, PlayerColor, PlayerId,
    Result, Seat,
};
use crate::rules::{apply_action, Transition};
use crate::store::{GameStore, Notifier};
use crate::strategy::{Mode, Npc};

/// Service configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Rules for new games.
    pub game: GameConfig,

    /// Seed for the service RNG. Each new game draws its own seed from it,
    /// and computer players draw their shuffles and cuts from it.
    pub seed: u64,

    /// Most computer-player actions applied after one incoming action.
    pub max_npc_steps: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            seed: 42,
            max_npc_steps: 10_000,
        }
    }
}

impl ServiceConfig {
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_npc_steps(mut self, steps: usize) -> Self {
        self.max_npc_steps = steps;
        self
    }
}

pub struct GameService<S, N> {
    store: S,
    notifier: N,
    config: ServiceConfig,
    rng: Mutex<GameRng>,
    npcs: Mutex<FxHashMap<PlayerId, Mode>>,
    next_player: AtomicU64,
    next_game: AtomicU64,
}

impl<S: GameStore, N: Notifier> GameService<S, N> {
    pub fn new(store: S, notifier: N, config: ServiceConfig) -> Self {
        Self {
            store,
            notifier,
            rng: Mutex::new(GameRng::new(config.seed)),
            config,
            npcs: Mutex::new(FxHashMap::default()),
            next_player: AtomicU64::new(1),
            next_game: AtomicU64::new(1),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn create_player(&self, name: impl Into<String>) -> Result<Player> {
        let id = PlayerId(self.next_player.fetch_add(1, Ordering::Relaxed));
        let player = Player::new(id, name);
        self.store.create_player(player.clone())?;
        debug!(player = id.0, name = %player.name, "Created player");
        Ok(player)
    }

    /// Let the computer play for `player` from now on.
    pub fn register_npc(&self, player: PlayerId, mode: Mode) -> Result<()> {
        self.store.get_player(player)?;
        self.npcs.lock().insert(player, mode);
        debug!(player = player.0, ?mode, "Registered NPC");
        Ok(())
    }

    /// Seat `players` in order, with the first dealing, and save the new game.
    ///
    /// Returns the game after any computer players have acted.
    pub fn create_game(&self, players: &[PlayerId]) -> Result<Game> {
        let seated = players
            .iter()
            .map(|&id| self.store.get_player(id))
            .collect::<Result<Vec<_>>>()?;

        let id = GameId(self.next_game.fetch_add(1, Ordering::Relaxed));
        let seed = self.rng.lock().next_seed();
        let game = Game::new(id, seated, self.config.game.clone(), seed)?;

        self.store.save(&game)?;
        for seat in game.seats() {
            self.store
                .add_player_to_game(game.player(seat).id, game.color(seat), id)?;
        }
        info!(game_id = id.0, players = players.len(), "Created game");
        self.notify(&game, &Transition::default());

        Ok(self.run_npcs(game))
    }

    /// Apply a player's action to the stored game.
    ///
    /// Returns what that action did. Computer players then answer any
    /// blockers they hold; their moves are saved and notified but not
    /// returned, and their failures never fail this call.
    pub fn handle_action(&self, action: &PlayerAction) -> Result<Transition> {
        let mut game = self.store.get(action.game)?;
        let transition = apply_action(&mut game, action)?;
        self.store.save(&game)?;
        self.notify(&game, &transition);

        self.run_npcs(game);
        Ok(transition)
    }

    pub fn game(&self, id: GameId) -> Result<Game> {
        self.store.get(id)
    }

    pub fn game_at_version(&self, id: GameId, version: usize) -> Result<Game> {
        self.store.get_at_version(id, version)
    }

    /// Games `player` has joined and their color in each.
    pub fn games_for(&self, player: PlayerId) -> Result<Vec<(GameId, PlayerColor)>> {
        self.store.games_for(player)
    }

    /// Let computer players answer their blockers. Returns the latest game
    /// this loop knows of.
    fn run_npcs(&self, mut game: Game) -> Game {
        for _ in 0..self.config.max_npc_steps {
            match self.npc_step(&game) {
                Ok(Some(next)) => game = next,
                Ok(None) => return game,
                Err(EngineError::OutOfOrder { .. }) => {
                    warn!(game_id = game.id.0, "NPC save lost a race, reloading");
                    match self.store.get(game.id) {
                        Ok(latest) => game = latest,
                        Err(err) => {
                            warn!(game_id = game.id.0, %err, "Reload after lost race failed");
                            return game;
                        }
                    }
                }
                Err(err) => {
                    warn!(game_id = game.id.0, %err, "NPC action failed");
                    return game;
                }
            }
        }

        warn!(
            game_id = game.id.0,
            steps = self.config.max_npc_steps,
            "NPC step limit reached"
        );
        game
    }

    /// One computer move, saved and notified. `None` when no computer
    /// player is blocked.
    fn npc_step(&self, game: &Game) -> Result<Option<Game>> {
        let Some((seat, mode)) = self.next_npc(game) else {
            return Ok(None);
        };
        let player = game.player(seat).id;
        let npc = Npc::new(mode, game.color(seat));

        let action = {
            let mut rng = self.rng.lock();
            npc.build_action(game, player, &mut rng)?
        };
        let Some(action) = action else {
            return Ok(None);
        };

        let mut next = game.clone();
        let transition = apply_action(&mut next, &action)?;
        self.store.save(&next)?;
        self.notify(&next, &transition);
        Ok(Some(next))
    }

    /// First blocked seat played by the computer.
    fn next_npc(&self, game: &Game) -> Option<(Seat, Mode)> {
        let npcs = self.npcs.lock();
        game.blocking()
            .find_map(|(seat, _)| npcs.get(&game.player(seat).id).map(|m| (seat, *m)))
    }

    fn notify(&self, game: &Game, transition: &Transition) {
        let scores = transition.score_messages();
        if !scores.is_empty() {
            self.notifier.notify_score_update(game, &scores);
        }

        for message in transition.messages() {
            for player in game.players() {
                self.notifier.notify_message(game, player.id, &message);
            }
        }

        for (seat, blocker) in game.blocking() {
            let message = format!("waiting on you to {blocker}");
            self.notifier
                .notify_blocking(game, game.player(seat).id, blocker, &message);
        }
    }
}
