//! GameService orchestration with the in-memory store.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use common::init_logging;
use cribbage_engine::core::{
    Blocker, EngineError, Game, GameId, Phase, Player, PlayerAction, PlayerColor, PlayerId, Result,
};
use cribbage_engine::service::{GameService, ServiceConfig};
use cribbage_engine::store::{GameStore, MemoryStore, Notifier, NullNotifier};
use cribbage_engine::strategy::Mode;

/// Records everything it is told.
#[derive(Default)]
struct RecordingNotifier {
    blocking: Mutex<Vec<(GameId, PlayerId, Blocker)>>,
    messages: Mutex<Vec<(GameId, PlayerId, String)>>,
    score_updates: Mutex<Vec<Vec<String>>>,
}

impl Notifier for RecordingNotifier {
    fn notify_blocking(&self, game: &Game, player: PlayerId, blocker: Blocker, _message: &str) {
        self.blocking.lock().push((game.id, player, blocker));
    }

    fn notify_message(&self, game: &Game, player: PlayerId, message: &str) {
        self.messages.lock().push((game.id, player, message.to_string()));
    }

    fn notify_score_update(&self, _game: &Game, messages: &[String]) {
        self.score_updates.lock().push(messages.to_vec());
    }
}

/// Memory store that refuses saves of one version, as if another writer got
/// there first, for a set number of attempts.
struct ContestedStore {
    inner: MemoryStore,
    version: usize,
    refusals: AtomicUsize,
}

impl ContestedStore {
    fn new(version: usize, refusals: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            version,
            refusals: AtomicUsize::new(refusals),
        }
    }
}

impl GameStore for ContestedStore {
    fn get(&self, id: GameId) -> Result<Game> {
        self.inner.get(id)
    }

    fn get_at_version(&self, id: GameId, version: usize) -> Result<Game> {
        self.inner.get_at_version(id, version)
    }

    fn save(&self, game: &Game) -> Result<()> {
        let refuse = game.num_actions() == self.version
            && self
                .refusals
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
        if refuse {
            return Err(EngineError::OutOfOrder {
                game: game.id,
                stored: game.num_actions(),
                attempted: game.num_actions(),
            });
        }
        self.inner.save(game)
    }

    fn create_player(&self, player: Player) -> Result<()> {
        self.inner.create_player(player)
    }

    fn get_player(&self, id: PlayerId) -> Result<Player> {
        self.inner.get_player(id)
    }

    fn add_player_to_game(&self, player: PlayerId, color: PlayerColor, game: GameId) -> Result<()> {
        self.inner.add_player_to_game(player, color, game)
    }

    fn games_for(&self, player: PlayerId) -> Result<Vec<(GameId, PlayerColor)>> {
        self.inner.games_for(player)
    }
}

/// Four computer players finish a game on their own.
#[test]
fn test_all_npc_game_finishes() {
    init_logging();
    let svc = GameService::new(
        MemoryStore::new(),
        NullNotifier,
        ServiceConfig::default().with_seed(2024),
    );

    let ids: Vec<_> = ["a", "b", "c", "d"]
        .iter()
        .map(|name| svc.create_player(*name).unwrap().id)
        .collect();
    let modes = [Mode::Dumb, Mode::Simple, Mode::Calculated, Mode::Simple];
    for (id, mode) in ids.iter().zip(modes) {
        svc.register_npc(*id, mode).unwrap();
    }

    let game = svc.create_game(&ids).unwrap();

    assert_eq!(game.phase(), Phase::Done);
    let stored = svc.game(game.id).unwrap();
    assert_eq!(stored, game);

    // every intermediate version is stored
    let first = svc.game_at_version(game.id, 0).unwrap();
    assert_eq!(first.num_actions(), 0);
    let last = svc.game_at_version(game.id, game.num_actions()).unwrap();
    assert_eq!(last, game);
}

/// A human action is applied, saved, notified, and answered by the NPC.
#[test]
fn test_handle_action_notifies() {
    let svc = GameService::new(
        MemoryStore::new(),
        RecordingNotifier::default(),
        ServiceConfig::default(),
    );
    let human = svc.create_player("human").unwrap();
    let bot = svc.create_player("bot").unwrap();
    svc.register_npc(bot.id, Mode::Dumb).unwrap();

    let game = svc.create_game(&[human.id, bot.id]).unwrap();
    let t = svc
        .handle_action(&PlayerAction::deal(game.id, human.id, 2))
        .unwrap();
    assert!(!t.events.is_empty());

    let game = svc.game(game.id).unwrap();
    assert_eq!(game.num_actions(), 2);
    assert_eq!(game.blocker_for(game.seat_of(human.id).unwrap()), Some(Blocker::CribCard));

    let notifier = svc.notifier();
    assert!(notifier
        .blocking
        .lock()
        .contains(&(game.id, human.id, Blocker::CribCard)));
    assert!(notifier
        .messages
        .lock()
        .iter()
        .any(|(id, to, m)| *id == game.id && *to == bot.id && m.contains("dealt")));
    // nobody scores on the deal or the discards
    assert!(notifier.score_updates.lock().is_empty());
}

/// Rejected actions are not saved.
#[test]
fn test_rejected_action_not_saved() {
    let svc = GameService::new(MemoryStore::new(), NullNotifier, ServiceConfig::default());
    let a = svc.create_player("a").unwrap();
    let b = svc.create_player("b").unwrap();
    let game = svc.create_game(&[a.id, b.id]).unwrap();

    let err = svc
        .handle_action(&PlayerAction::deal(game.id, b.id, 1))
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidBlocker { .. }));
    assert_eq!(svc.store().version_count(game.id), 1);
}

#[test]
fn test_duplicate_player_rejected() {
    let svc = GameService::new(MemoryStore::new(), NullNotifier, ServiceConfig::default());
    let a = svc.create_player("a").unwrap();

    let err = svc.create_game(&[a.id, a.id]).unwrap_err();
    assert!(matches!(err, EngineError::InvalidPayload(_)));
}

// =============================================================================
// Computer players after a saved action
// =============================================================================

/// The human's deal is saved; the bot's discard loses one race, reloads and
/// still lands.
#[test]
fn test_npc_retries_after_lost_race() {
    init_logging();
    let svc = GameService::new(ContestedStore::new(2, 1), NullNotifier, ServiceConfig::default());
    let human = svc.create_player("human").unwrap();
    let bot = svc.create_player("bot").unwrap();
    svc.register_npc(bot.id, Mode::Dumb).unwrap();
    let game = svc.create_game(&[human.id, bot.id]).unwrap();

    svc.handle_action(&PlayerAction::deal(game.id, human.id, 2))
        .unwrap();

    let game = svc.game(game.id).unwrap();
    assert_eq!(game.num_actions(), 2);
    assert_eq!(game.phase(), Phase::BuildCrib);
    let blocked: Vec<_> = game.blocking().map(|(seat, _)| game.player(seat).id).collect();
    assert_eq!(blocked, vec![human.id]);
}

/// A bot that can never save does not fail the human's action, and the
/// human's move stays stored.
#[test]
fn test_npc_failure_keeps_saved_action() {
    init_logging();
    let config = ServiceConfig::default().with_max_npc_steps(4);
    let svc = GameService::new(ContestedStore::new(2, usize::MAX), NullNotifier, config);
    let human = svc.create_player("human").unwrap();
    let bot = svc.create_player("bot").unwrap();
    svc.register_npc(bot.id, Mode::Dumb).unwrap();
    let game = svc.create_game(&[human.id, bot.id]).unwrap();

    let t = svc
        .handle_action(&PlayerAction::deal(game.id, human.id, 2))
        .unwrap();
    assert!(!t.events.is_empty());

    let game = svc.game(game.id).unwrap();
    assert_eq!(game.num_actions(), 1);
    assert_eq!(game.phase(), Phase::BuildCrib);
    assert_eq!(
        game.blocker_for(game.seat_of(bot.id).unwrap()),
        Some(Blocker::CribCard)
    );
}

/// New games show up in each player's game list with their color.
#[test]
fn test_games_listed_per_player() {
    let svc = GameService::new(MemoryStore::new(), NullNotifier, ServiceConfig::default());
    let a = svc.create_player("a").unwrap();
    let b = svc.create_player("b").unwrap();

    let game = svc.create_game(&[a.id, b.id]).unwrap();

    assert_eq!(svc.games_for(a.id).unwrap(), vec![(game.id, PlayerColor::Blue)]);
    assert_eq!(svc.games_for(b.id).unwrap(), vec![(game.id, PlayerColor::Red)]);
    assert_eq!(
        svc.games_for(PlayerId(99)).unwrap_err(),
        EngineError::NotFound(cribbage_engine::core::Missing::Player(PlayerId(99)))
    );
}
