//! Counting hands and the crib, then rolling over to the next deal.

use tracing::{debug, warn};

use super::engine::{award, set_phase};
use super::events::{GameEvent, ScoreReason, Transition};
use crate::core::{Blocker, EngineError, Game, Phase, Result, Seat};
use crate::scoring::{crib_points, hand_points};

pub(super) fn count_hand(
    game: &mut Game,
    seat: Seat,
    claimed: u8,
    transition: &mut Transition,
) -> Result<()> {
    let cut = game
        .cut
        .ok_or_else(|| EngineError::invalid_payload("no cut card to count with"))?;
    let actual = hand_points(cut, &game.counted_hand(seat));
    check_claim(game, seat, claimed, actual, transition);

    game.blocking.remove(&seat);
    if award(game, seat, actual, ScoreReason::Hand, transition) {
        return Ok(());
    }

    let dealer = game.dealer;
    if seat == dealer {
        set_phase(game, Phase::CribCounting, transition);
        game.blocking.insert(dealer, Blocker::CountCrib);
    } else if game.blocking.is_empty() {
        game.blocking.insert(dealer, Blocker::CountHand);
    }
    Ok(())
}

pub(super) fn count_crib(
    game: &mut Game,
    seat: Seat,
    claimed: u8,
    transition: &mut Transition,
) -> Result<()> {
    let cut = game
        .cut
        .ok_or_else(|| EngineError::invalid_payload("no cut card to count with"))?;
    let actual = crib_points(cut, &game.crib);
    check_claim(game, seat, claimed, actual, transition);

    game.blocking.remove(&seat);
    if award(game, seat, actual, ScoreReason::Crib, transition) {
        return Ok(());
    }

    end_hand(game, transition);
    Ok(())
}

/// Claims are informational. The computed value is what gets scored.
fn check_claim(game: &Game, seat: Seat, claimed: u8, actual: u8, transition: &mut Transition) {
    if claimed == actual {
        return;
    }
    let player = game.player(seat).id;
    let mismatch = EngineError::ScoreMismatch {
        player,
        claimed,
        actual,
    };
    warn!(game_id = game.id.0, %mismatch, "Applying computed count");
    transition.push(GameEvent::ScoreMismatch {
        player,
        claimed,
        actual,
    });
}

/// Return every card to the deck and pass the deal clockwise.
fn end_hand(game: &mut Game, transition: &mut Transition) {
    game.lag_scores = game.scores;

    let mut returned: Vec<_> = game.hands.values_mut().flat_map(std::mem::take).collect();
    returned.append(&mut game.crib);
    returned.extend(std::mem::take(&mut game.pegged).into_iter().map(|p| p.card));
    game.deck.restore(returned);

    game.cut = None;
    game.series_start = 0;
    game.said_go.clear();
    game.dealer = game.dealer.next(game.player_count());

    debug!(game_id = game.id.0, dealer = game.dealer.0, "Hand finished");
    set_phase(game, Phase::Deal, transition);
    game.blocking.insert(game.dealer, Blocker::DealCards);
}
