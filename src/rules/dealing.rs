//! Deal, crib building and the cut.

use tracing::debug;

use super::engine::{award, set_phase};
use super::events::{GameEvent, ScoreReason, Transition};
use crate::cards::Card;
use crate::core::{Blocker, EngineError, Game, GameRng, Phase, Result, Seat};

/// Shuffle and deal, starting left of the dealer.
///
/// Three-player games put one card from the deck straight into the crib so
/// that it ends up with four cards.
pub(super) fn deal(game: &mut Game, shuffles: u32, transition: &mut Transition) -> Result<()> {
    if shuffles == 0 || shuffles > game.config.max_shuffles {
        return Err(EngineError::invalid_payload(format!(
            "shuffle count must be 1 to {}, got {shuffles}",
            game.config.max_shuffles
        )));
    }

    let mut rng = GameRng::from_state(&game.rng);
    game.deck.shuffle(shuffles, &mut rng);
    game.rng = rng.state();

    let count = game.player_count();
    for _ in 0..game.deal_size() {
        for seat in game.dealer.clockwise_from(count) {
            let dealt = game.deck.draw(1)?;
            game.hands[seat].extend(dealt);
        }
    }
    if count == 3 {
        let extra = game.deck.draw(1)?;
        game.crib.extend(extra);
    }

    game.blocking.clear();
    for seat in game.seats() {
        game.blocking.insert(seat, Blocker::CribCard);
    }

    debug!(game_id = game.id.0, shuffles, dealer = game.dealer.0, "Dealt");
    transition.push(GameEvent::Dealt {
        dealer: game.player(game.dealer).id,
    });
    set_phase(game, Phase::BuildCrib, transition);
    Ok(())
}

/// Move the seat's discards into the crib.
pub(super) fn build_crib(
    game: &mut Game,
    seat: Seat,
    cards: &[Card],
    transition: &mut Transition,
) -> Result<()> {
    let needed = game.discard_size();
    if cards.len() != needed {
        return Err(EngineError::invalid_payload(format!(
            "must discard exactly {needed} card(s), got {}",
            cards.len()
        )));
    }
    for (i, card) in cards.iter().enumerate() {
        if cards[..i].contains(card) {
            return Err(EngineError::invalid_payload(format!(
                "{card} discarded twice"
            )));
        }
    }

    let hand = &mut game.hands[seat];
    if let Some(missing) = cards.iter().find(|c| !hand.contains(c)) {
        return Err(EngineError::invalid_payload(format!(
            "{missing} is not in hand"
        )));
    }
    hand.retain(|c| !cards.contains(c));
    game.crib.extend_from_slice(cards);
    game.blocking.remove(&seat);

    transition.push(GameEvent::Discarded {
        player: game.player(seat).id,
        cards: cards.len(),
    });

    if game.blocking.is_empty() {
        set_phase(game, Phase::Cut, transition);
        let cutter = game.dealer.next(game.player_count());
        game.blocking.insert(cutter, Blocker::CutCard);
    }
    Ok(())
}

/// Reveal the card `percentage` of the way into the remaining deck.
///
/// The card is peeked, not drawn. A jack scores his heels for the dealer.
pub(super) fn cut(
    game: &mut Game,
    seat: Seat,
    percentage: f64,
    transition: &mut Transition,
) -> Result<()> {
    if !percentage.is_finite() || !(0.0..1.0).contains(&percentage) {
        return Err(EngineError::invalid_payload(format!(
            "cut must be in [0, 1), got {percentage}"
        )));
    }

    let remaining = game.deck.len();
    let index = ((percentage * remaining as f64).floor() as usize).min(remaining.saturating_sub(1));
    let card = game.deck.peek(index).ok_or(EngineError::EmptyDeck {
        requested: 1,
        remaining,
    })?;

    game.cut = Some(card);
    game.blocking.remove(&seat);
    debug!(game_id = game.id.0, %card, index, "Cut");
    transition.push(GameEvent::CutRevealed { card });

    let dealer = game.dealer;
    if card.is_jack() && award(game, dealer, 2, ScoreReason::HisHeels, transition) {
        return Ok(());
    }

    set_phase(game, Phase::Pegging, transition);
    game.series_start = game.pegged.len();
    game.said_go.clear();
    let leader = dealer.next(game.player_count());
    game.blocking.insert(leader, Blocker::PegCard);
    Ok(())
}
