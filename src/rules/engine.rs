//! Action application.
//!
//! `apply_action` is the only way a game changes. It checks that the game is
//! live, that the actor is blocked for exactly the declared reason and that
//! the payload answers that reason, then hands off to the phase handler.
//!
//! Handlers run against a clone of the game (cheap, thanks to `im`), and the
//! clone replaces the original only when the handler succeeds. A rejected
//! action therefore never leaves a partial change behind, and each success
//! appends exactly one entry to the action log.
//!
//! The engine is synchronous and does no I/O. It is not safe to apply two
//! actions to the same game concurrently; callers serialize per game and the
//! store's ordering check catches anyone who doesn't.

use tracing::{debug, info};

use super::events::{GameEvent, ScoreReason, Transition};
use super::{counting, dealing, pegging};
use crate::core::{
    ActionPayload, EngineError, Game, Missing, Phase, PlayerAction, Result, Seat,
};

/// Validate and apply `action`, returning what happened.
pub fn apply_action(game: &mut Game, action: &PlayerAction) -> Result<Transition> {
    if action.game != game.id {
        return Err(EngineError::NotFound(Missing::Game(action.game)));
    }
    if game.is_over() {
        return Err(EngineError::GameOver(game.id));
    }

    let seat = game.seat_of(action.player)?;
    let expected = game.blocker_for(seat);
    if expected != Some(action.overcomes) {
        return Err(EngineError::InvalidBlocker {
            player: action.player,
            declared: action.overcomes,
            expected,
        });
    }
    if action.payload.blocker() != action.overcomes {
        return Err(EngineError::invalid_payload(format!(
            "{:?} payload cannot resolve {:?}",
            action.payload, action.overcomes
        )));
    }

    debug!(
        game_id = game.id.0,
        player = action.player.0,
        blocker = ?action.overcomes,
        "Applying action"
    );

    let mut next = game.clone();
    let mut transition = Transition::default();

    match &action.payload {
        ActionPayload::Deal { shuffles } => dealing::deal(&mut next, *shuffles, &mut transition)?,
        ActionPayload::BuildCrib { cards } => {
            dealing::build_crib(&mut next, seat, cards, &mut transition)?
        }
        ActionPayload::Cut { percentage } => {
            dealing::cut(&mut next, seat, *percentage, &mut transition)?
        }
        ActionPayload::Peg { card } => pegging::peg(&mut next, seat, *card, &mut transition)?,
        ActionPayload::Go => pegging::say_go(&mut next, seat, &mut transition)?,
        ActionPayload::CountHand { points } => {
            counting::count_hand(&mut next, seat, *points, &mut transition)?
        }
        ActionPayload::CountCrib { points } => {
            counting::count_crib(&mut next, seat, *points, &mut transition)?
        }
    }

    next.actions.push_back(action.clone());
    *game = next;
    Ok(transition)
}

/// Add points to the seat's color. Returns true if that ended the game.
///
/// Scores are clamped to the winning score. Reaching it moves the game to
/// `Done` and clears the blocking set.
pub(crate) fn award(
    game: &mut Game,
    seat: Seat,
    points: u8,
    reason: ScoreReason,
    transition: &mut Transition,
) -> bool {
    if points == 0 {
        return false;
    }

    let color = game.color(seat);
    let target = game.config.winning_score;
    let total = game.scores[color].saturating_add(points).min(target);
    game.scores[color] = total;

    transition.push(GameEvent::Scored {
        player: game.player(seat).id,
        color,
        points,
        reason,
        total,
    });

    if total < target {
        return false;
    }

    info!(game_id = game.id.0, %color, total, "Game won");
    set_phase(game, Phase::Done, transition);
    game.blocking.clear();
    transition.push(GameEvent::GameWon { color });
    true
}

pub(crate) fn set_phase(game: &mut Game, to: Phase, transition: &mut Transition) {
    let from = game.phase;
    game.phase = to;
    debug!(game_id = game.id.0, ?from, ?to, "Phase changed");
    transition.push(GameEvent::PhaseChanged { from, to });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Blocker, GameConfig, GameId, Player, PlayerColor, PlayerId};

    fn two_player_game() -> Game {
        let players = vec![
            Player::new(PlayerId(1), "alice"),
            Player::new(PlayerId(2), "bob"),
        ];
        Game::new(GameId(1), players, GameConfig::default(), 7).unwrap()
    }

    #[test]
    fn test_wrong_player_is_invalid_blocker() {
        let mut game = two_player_game();
        let err = apply_action(&mut game, &PlayerAction::deal(GameId(1), PlayerId(2), 1))
            .unwrap_err();

        assert_eq!(
            err,
            EngineError::InvalidBlocker {
                player: PlayerId(2),
                declared: Blocker::DealCards,
                expected: None,
            }
        );
        assert_eq!(game.num_actions(), 0);
    }

    #[test]
    fn test_wrong_reason_is_invalid_blocker() {
        let mut game = two_player_game();
        let err = apply_action(&mut game, &PlayerAction::cut(GameId(1), PlayerId(1), 0.5))
            .unwrap_err();

        assert!(matches!(
            err,
            EngineError::InvalidBlocker {
                expected: Some(Blocker::DealCards),
                ..
            }
        ));
    }

    #[test]
    fn test_payload_must_match_declared_blocker() {
        let mut game = two_player_game();
        let mut action = PlayerAction::cut(GameId(1), PlayerId(1), 0.5);
        action.overcomes = Blocker::DealCards;

        let err = apply_action(&mut game, &action).unwrap_err();
        assert!(matches!(err, EngineError::InvalidPayload(_)));
    }

    #[test]
    fn test_unknown_player_and_game() {
        let mut game = two_player_game();
        assert_eq!(
            apply_action(&mut game, &PlayerAction::deal(GameId(1), PlayerId(9), 1)).unwrap_err(),
            EngineError::NotFound(Missing::Player(PlayerId(9)))
        );
        assert_eq!(
            apply_action(&mut game, &PlayerAction::deal(GameId(2), PlayerId(1), 1)).unwrap_err(),
            EngineError::NotFound(Missing::Game(GameId(2)))
        );
    }

    #[test]
    fn test_award_clamps_and_finishes_game() {
        let mut game = two_player_game();
        game.scores[PlayerColor::Blue] = 119;
        let mut t = Transition::default();

        assert!(award(&mut game, Seat(0), 5, ScoreReason::Hand, &mut t));
        assert_eq!(game.score(PlayerColor::Blue), 121);
        assert_eq!(game.phase(), Phase::Done);
        assert_eq!(game.blocking().count(), 0);
        assert_eq!(game.winner(), Some(PlayerColor::Blue));
        assert!(t.events.contains(&GameEvent::GameWon {
            color: PlayerColor::Blue
        }));

        let err = apply_action(&mut game, &PlayerAction::deal(GameId(1), PlayerId(1), 1))
            .unwrap_err();
        assert_eq!(err, EngineError::GameOver(GameId(1)));
    }

    #[test]
    fn test_zero_points_is_silent() {
        let mut game = two_player_game();
        let mut t = Transition::default();
        assert!(!award(&mut game, Seat(1), 0, ScoreReason::Hand, &mut t));
        assert!(t.events.is_empty());
    }
}
