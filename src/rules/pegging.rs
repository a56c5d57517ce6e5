//! The play.
//!
//! Players lay cards in turn, keeping the running count at or under 31. A
//! player with no playable card says go; once everyone still holding cards
//! has said go, the last player to lay a card scores 1 and the count resets.
//! Hitting 31 exactly resets it too. When every hand is empty the last card
//! scores 1 (unless it made 31) and counting begins.

use tracing::debug;

use super::engine::{award, set_phase};
use super::events::{GameEvent, ScoreReason, Transition};
use crate::cards::Card;
use crate::core::{Blocker, EngineError, Game, PeggedCard, Phase, Result, Seat, MAX_PEG_COUNT};
use crate::scoring::score_peg;

pub(super) fn peg(
    game: &mut Game,
    seat: Seat,
    card: Card,
    transition: &mut Transition,
) -> Result<()> {
    let position = game.hands[seat]
        .iter()
        .position(|c| *c == card)
        .ok_or_else(|| EngineError::invalid_payload(format!("{card} is not in hand")))?;

    let count = game.current_count() + card.peg_value();
    if count > MAX_PEG_COUNT {
        return Err(EngineError::invalid_payload(format!(
            "{card} would take the count to {count}"
        )));
    }

    let player = game.player(seat).id;
    game.hands[seat].remove(position);
    game.pegged.push_back(PeggedCard { card, player });
    game.blocking.remove(&seat);

    debug!(game_id = game.id.0, player = player.0, %card, count, "Pegged");
    transition.push(GameEvent::Pegged {
        player,
        card,
        count,
    });

    let series: Vec<Card> = game.current_series().map(|p| p.card).collect();
    let score = score_peg(&series);
    let awards = [
        (score.fifteen, ScoreReason::Fifteen),
        (score.thirty_one, ScoreReason::ThirtyOne),
        (score.pairs, ScoreReason::Pairs),
        (score.run, ScoreReason::Run),
    ];
    for (points, reason) in awards {
        if award(game, seat, points, reason, transition) {
            return Ok(());
        }
    }

    if count == MAX_PEG_COUNT {
        reset_count(game, transition);
    }
    advance(game, seat, transition)
}

pub(super) fn say_go(game: &mut Game, seat: Seat, transition: &mut Transition) -> Result<()> {
    if !game.legal_pegs(seat).is_empty() {
        return Err(EngineError::invalid_payload(
            "cannot say go while holding a playable card",
        ));
    }

    game.blocking.remove(&seat);
    game.said_go.push(seat);
    transition.push(GameEvent::SaidGo {
        player: game.player(seat).id,
    });
    advance(game, seat, transition)
}

/// Block whoever plays next, or finish the play.
fn advance(game: &mut Game, from: Seat, transition: &mut Transition) -> Result<()> {
    let seats = game.player_count();

    if game.hands.values().all(Vec::is_empty) {
        if game.current_count() > 0 {
            let last = last_pegger(game)?;
            if award(game, last, 1, ScoreReason::LastCard, transition) {
                return Ok(());
            }
        }
        reset_count(game, transition);
        begin_counting(game, transition);
        return Ok(());
    }

    let next = from
        .clockwise_from(seats)
        .find(|s| !game.hands[*s].is_empty() && !game.said_go.contains(s));
    if let Some(next) = next {
        game.blocking.insert(next, Blocker::PegCard);
        return Ok(());
    }

    // everyone still holding cards is stuck
    let last = last_pegger(game)?;
    if award(game, last, 1, ScoreReason::Go, transition) {
        return Ok(());
    }
    reset_count(game, transition);

    let next = last
        .clockwise_from(seats)
        .find(|s| !game.hands[*s].is_empty())
        .ok_or_else(|| EngineError::invalid_payload("no player holds a card"))?;
    game.blocking.insert(next, Blocker::PegCard);
    Ok(())
}

fn last_pegger(game: &Game) -> Result<Seat> {
    let last = game
        .pegged
        .last()
        .ok_or_else(|| EngineError::invalid_payload("no card has been pegged"))?;
    game.seat_of(last.player)
}

fn reset_count(game: &mut Game, transition: &mut Transition) {
    game.series_start = game.pegged.len();
    game.said_go.clear();
    transition.push(GameEvent::CountReset);
}

/// Non-dealers count first; the dealer follows once they're all done.
fn begin_counting(game: &mut Game, transition: &mut Transition) {
    set_phase(game, Phase::Counting, transition);
    let dealer = game.dealer;
    for seat in game.seats().filter(|s| *s != dealer) {
        game.blocking.insert(seat, Blocker::CountHand);
    }
}
