//! Computer players.
//!
//! An `Npc` is a value built from a mode and a color whenever a decision is
//! needed; it keeps no state between decisions. All randomness comes from the
//! caller's `GameRng`.
//!
//! NPCs always claim the true count for hands and cribs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::advisor::{best_discard, best_static_discard};
use crate::cards::Card;
use crate::core::{
    Blocker, EngineError, Game, GameRng, PlayerAction, PlayerColor, PlayerId, Result, Seat,
};
use crate::scoring::{crib_points, hand_points, score_peg};

/// NPC dealers shuffle between 1 and this many times.
const NPC_MAX_SHUFFLES: u32 = 10;

/// Counts that hand the next player an easy fifteen or thirty-one.
const RISKY_COUNTS: [u8; 2] = [5, 21];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Random shuffles and cut, discards the first cards, plays the first legal card.
    Dumb,
    /// Keeps the best four without looking ahead; pegs for immediate points.
    Simple,
    /// Uses the discard advisor; pegs for immediate points while avoiding
    /// leaving the count on 5 or 21.
    Calculated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Npc {
    mode: Mode,
    color: PlayerColor,
}

impl Npc {
    #[must_use]
    pub fn new(mode: Mode, color: PlayerColor) -> Self {
        Self { mode, color }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The action `player` should take, or `None` if they are not blocked.
    pub fn build_action(
        &self,
        game: &Game,
        player: PlayerId,
        rng: &mut GameRng,
    ) -> Result<Option<PlayerAction>> {
        let seat = game.seat_of(player)?;
        let Some(blocker) = game.blocker_for(seat) else {
            return Ok(None);
        };
        debug!(
            game_id = game.id.0,
            player = player.0,
            mode = ?self.mode,
            color = %self.color,
            ?blocker,
            "NPC deciding"
        );

        let action = match blocker {
            Blocker::DealCards => {
                let shuffles = (rng.gen_range(0..NPC_MAX_SHUFFLES) + 1)
                    .min(game.config().max_shuffles);
                PlayerAction::deal(game.id, player, shuffles)
            }
            Blocker::CutCard => PlayerAction::cut(game.id, player, rng.gen_unit()),
            Blocker::CribCard => {
                PlayerAction::build_crib(game.id, player, &self.discards(game, seat)?)
            }
            Blocker::PegCard => match self.choose_peg(game, seat) {
                Some(card) => PlayerAction::peg(game.id, player, card),
                None => PlayerAction::go(game.id, player),
            },
            Blocker::CountHand => {
                let points = hand_points(cut_card(game)?, &game.counted_hand(seat));
                PlayerAction::count_hand(game.id, player, points)
            }
            Blocker::CountCrib => {
                let points = crib_points(cut_card(game)?, game.crib());
                PlayerAction::count_crib(game.id, player, points)
            }
        };
        Ok(Some(action))
    }

    fn discards(&self, game: &Game, seat: Seat) -> Result<Vec<Card>> {
        let hand = game.hand(seat);
        match self.mode {
            Mode::Dumb => Ok(hand.iter().take(game.discard_size()).copied().collect()),
            Mode::Simple => Ok(best_static_discard(hand)?.toss),
            Mode::Calculated => {
                // partners share a crib
                let own_crib = game.color(game.dealer()) == self.color;
                Ok(best_discard(hand, own_crib)?.toss)
            }
        }
    }

    fn choose_peg(&self, game: &Game, seat: Seat) -> Option<Card> {
        let legal = game.legal_pegs(seat);
        if self.mode == Mode::Dumb {
            return legal.first().copied();
        }

        let series: Vec<Card> = game.current_series().map(|p| p.card).collect();
        let count = game.current_count();
        let mut best: Option<(Card, (u8, bool))> = None;

        for card in legal {
            let mut played = series.clone();
            played.push(card);
            let points = score_peg(&played).total();
            let safe = self.mode != Mode::Calculated
                || !RISKY_COUNTS.contains(&(count + card.peg_value()));

            let key = (points, safe);
            if best.map_or(true, |(_, b)| key > b) {
                best = Some((card, key));
            }
        }
        best.map(|(card, _)| card)
    }
}

fn cut_card(game: &Game) -> Result<Card> {
    game.cut()
        .ok_or_else(|| EngineError::invalid_payload("no cut card to count with"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameId, Phase, Player};
    use crate::rules::apply_action;

    fn game(n: u64) -> Game {
        let players = (1..=n)
            .map(|i| Player::new(PlayerId(i), format!("npc{i}")))
            .collect();
        Game::new(GameId(3), players, GameConfig::default(), 11).unwrap()
    }

    fn step(game: &mut Game, mode: Mode, rng: &mut GameRng) -> bool {
        let blocked: Vec<Seat> = game.blocking().map(|(s, _)| s).collect();
        let Some(&seat) = blocked.first() else {
            return false;
        };
        let player = game.player(seat).id;
        let npc = Npc::new(mode, game.color(seat));
        let action = npc.build_action(game, player, rng).unwrap().unwrap();
        let t = apply_action(game, &action).unwrap();
        assert!(!t.has_mismatch());
        true
    }

    #[test]
    fn test_unblocked_player_has_no_action() {
        let g = game(2);
        let mut rng = GameRng::new(1);
        let npc = Npc::new(Mode::Dumb, PlayerColor::Red);
        assert_eq!(npc.build_action(&g, PlayerId(2), &mut rng).unwrap(), None);
    }

    #[test]
    fn test_dumb_deal_shuffle_range() {
        let g = game(2);
        let mut rng = GameRng::new(1);
        let npc = Npc::new(Mode::Dumb, PlayerColor::Blue);
        for _ in 0..50 {
            let action = npc.build_action(&g, PlayerId(1), &mut rng).unwrap().unwrap();
            match action.payload {
                crate::core::ActionPayload::Deal { shuffles } => {
                    assert!((1..=10).contains(&shuffles));
                }
                other => panic!("unexpected payload {other:?}"),
            }
        }
    }

    #[test]
    fn test_each_mode_plays_a_full_hand() {
        for mode in [Mode::Dumb, Mode::Simple, Mode::Calculated] {
            for players in 2..=4 {
                let mut g = game(players);
                let mut rng = GameRng::new(99);
                // play until the deal passes to the next seat
                while g.dealer() == Seat(0) && !g.is_over() {
                    assert!(step(&mut g, mode, &mut rng));
                }
                assert!(g.is_over() || g.phase() == Phase::Deal);
                assert_eq!(g.all_cards().len(), 52);
            }
        }
    }

    #[test]
    fn test_calculated_avoids_leaving_five() {
        let mut g = game(2);
        let mut rng = GameRng::new(5);
        // deal, discard, cut
        while g.phase() != Phase::Pegging {
            assert!(step(&mut g, Mode::Dumb, &mut rng));
        }
        let seat = g.blocking().next().unwrap().0;
        g.hands[seat] = crate::cards::parse_cards("5s 3h 9c Kd").unwrap();

        let npc = Npc::new(Mode::Calculated, g.color(seat));
        let card = npc.choose_peg(&g, seat).unwrap();
        assert_ne!(card.value, 5);
    }
}
