//! Outbound notifications.

use crate::core::{Blocker, Game, PlayerId};

/// Fire-and-forget delivery to players. Implementations must not fail the
/// caller; delivery problems are theirs to log.
///
/// Every call carries the game it concerns, since one player may sit in
/// several games at once.
pub trait Notifier: Send + Sync {
    /// Tell a player they must act in `game`.
    fn notify_blocking(&self, game: &Game, player: PlayerId, blocker: Blocker, message: &str);

    fn notify_message(&self, game: &Game, player: PlayerId, message: &str);

    /// Scores changed; `messages` say why.
    fn notify_score_update(&self, game: &Game, messages: &[String]);
}

/// Drops every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify_blocking(&self, _game: &Game, _player: PlayerId, _blocker: Blocker, _message: &str) {}

    fn notify_message(&self, _game: &Game, _player: PlayerId, _message: &str) {}

    fn notify_score_update(&self, _game: &Game, _messages: &[String]) {}
}
