//! Discard advisor.
//!
//! Chooses which 4 cards to keep from a 6-card (two players) or 5-card
//! (three or four players) deal.
//!
//! Every keep/toss split is scored as the total hand points over every unseen
//! card as a possible cut, plus a crib estimate for the tossed cards times the
//! number of cuts (added when the crib is ours, subtracted otherwise). The
//! arithmetic stays in integers so equal splits compare exactly; the
//! highest-valued split wins and ties go to the lowest sorted keep.

use smallvec::SmallVec;

use crate::cards::{Card, DECK_SIZE};
use crate::core::{EngineError, Result};
use crate::scoring::hand::{fifteen_count, pair_points, run_points};
use crate::scoring::hand_points;
use crate::subsets::{Combinations, Subset};

/// Cards kept after discarding.
pub const KEEP_SIZE: usize = 4;

/// A recommended split.
#[derive(Clone, Debug, PartialEq)]
pub struct Discard {
    /// Kept cards, sorted.
    pub keep: Vec<Card>,
    /// Cards for the crib, sorted.
    pub toss: Vec<Card>,
    /// Average points per cut, including the crib adjustment.
    pub expected: f64,
}

/// Best split for a hand, counting the cut.
///
/// `own_crib` is true when the tossed cards go to our side's crib.
///
/// ```
/// use cribbage_engine::cards::parse_cards;
/// use cribbage_engine::strategy::best_discard;
///
/// let hand = parse_cards("5h 5c 5s Jd Kc 2s").unwrap();
/// let advice = best_discard(&hand, true).unwrap();
/// assert_eq!(advice.keep, parse_cards("5s 5c 5h Jd").unwrap());
/// ```
pub fn best_discard(hand: &[Card], own_crib: bool) -> Result<Discard> {
    check_hand(hand)?;

    let unseen: Vec<Card> = (0..DECK_SIZE as u8)
        .filter_map(Card::from_index)
        .filter(|c| !hand.contains(c))
        .collect();
    let cuts = unseen.len() as i64;

    let best = best_split(hand, |keep, toss| {
        let hand_total: i64 = unseen
            .iter()
            .map(|&cut| i64::from(hand_points(cut, keep)))
            .sum();
        let crib = i64::from(crib_estimate(toss)) * cuts;
        if own_crib {
            hand_total + crib
        } else {
            hand_total - crib
        }
    })?;

    Ok(best.into_discard(cuts))
}

/// Best split looking only at the kept cards, with no cut and no crib.
pub fn best_static_discard(hand: &[Card]) -> Result<Discard> {
    check_hand(hand)?;
    let best = best_split(hand, |keep, _| i64::from(static_points(keep)))?;
    Ok(best.into_discard(1))
}

/// Rough worth of the tossed cards to whoever owns the crib.
///
/// Pairs and fifteens among the tossed cards, a point per five, and a point
/// per pair of adjacent values.
#[must_use]
pub fn crib_estimate(toss: &[Card]) -> u8 {
    let fives = toss.iter().filter(|c| c.value == 5).count() as u8;
    let mut adjacent = 0;
    for (i, a) in toss.iter().enumerate() {
        adjacent += toss[i + 1..]
            .iter()
            .filter(|b| a.value.abs_diff(b.value) == 1)
            .count() as u8;
    }
    pair_points(toss) + 2 * fifteen_count(toss) + fives + adjacent
}

/// Points in the kept cards alone.
fn static_points(keep: &[Card]) -> u8 {
    let flush = match keep.split_first() {
        Some((first, rest)) if rest.iter().all(|c| c.suit == first.suit) => 4,
        _ => 0,
    };
    2 * fifteen_count(keep) + pair_points(keep) + run_points(keep) + flush
}

fn check_hand(hand: &[Card]) -> Result<()> {
    if !(5..=6).contains(&hand.len()) {
        return Err(EngineError::invalid_payload(format!(
            "discard advice needs 5 or 6 cards, got {}",
            hand.len()
        )));
    }
    for (i, card) in hand.iter().enumerate() {
        if hand[..i].contains(card) {
            return Err(EngineError::invalid_payload(format!("{card} held twice")));
        }
    }
    Ok(())
}

struct Split {
    keep: Subset<Card>,
    toss: SmallVec<[Card; 2]>,
    value: i64,
}

impl Split {
    fn into_discard(self, divisor: i64) -> Discard {
        Discard {
            keep: self.keep.into_vec(),
            toss: self.toss.into_vec(),
            expected: self.value as f64 / divisor.max(1) as f64,
        }
    }
}

fn best_split(hand: &[Card], value_of: impl Fn(&[Card], &[Card]) -> i64) -> Result<Split> {
    let mut best: Option<Split> = None;

    for mut keep in Combinations::new(hand, KEEP_SIZE)? {
        keep.sort_unstable();
        let mut toss: SmallVec<[Card; 2]> =
            hand.iter().filter(|c| !keep.contains(c)).copied().collect();
        toss.sort_unstable();

        let value = value_of(&keep, &toss);
        let better = match &best {
            None => true,
            Some(b) => value > b.value || (value == b.value && keep < b.keep),
        };
        if better {
            best = Some(Split { keep, toss, value });
        }
    }

    best.ok_or(EngineError::InvalidArity {
        n: hand.len(),
        k: KEEP_SIZE,
    })
}
