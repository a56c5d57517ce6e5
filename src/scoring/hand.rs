//! Hand and crib scoring.
//!
//! Both functions score the group formed by the cut card and the held cards:
//!
//! | category | points |
//! |----------|--------|
//! | fifteens | 2 per subset (size 2..=n) whose peg values sum to 15 |
//! | pairs    | 2 per unordered pair of equal value |
//! | runs     | length of each run of ≥3 consecutive values, once per combination of duplicates |
//! | flush    | hand: 4 if the held cards share a suit, 5 if the cut matches too; crib: 5 only if every card and the cut match |
//! | nobs     | 1 for a held jack of the cut's suit |

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, KING};
use crate::subsets::Combinations;

const FIFTEEN: u8 = 15;

/// Points by category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub fifteens: u8,
    pub pairs: u8,
    pub runs: u8,
    pub flush: u8,
    pub nobs: u8,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn total(&self) -> u8 {
        self.fifteens + self.pairs + self.runs + self.flush + self.nobs
    }
}

/// Points for a 4-card hand with the given cut.
///
/// ```
/// use cribbage_engine::cards::parse_cards;
/// use cribbage_engine::scoring::hand_points;
///
/// let hand = parse_cards("5h 5c 5s Jd").unwrap();
/// let cut = "5d".parse().unwrap();
/// assert_eq!(hand_points(cut, &hand), 29);
/// ```
#[must_use]
pub fn hand_points(cut: Card, hand: &[Card]) -> u8 {
    score_hand(cut, hand).total()
}

/// Points for a crib (4 or 5 cards) with the given cut.
#[must_use]
pub fn crib_points(cut: Card, crib: &[Card]) -> u8 {
    score_crib(cut, crib).total()
}

#[must_use]
pub fn score_hand(cut: Card, hand: &[Card]) -> ScoreBreakdown {
    let flush = match hand.split_first() {
        Some((first, rest)) if rest.iter().all(|c| c.suit == first.suit) => {
            if cut.suit == first.suit {
                5
            } else {
                4
            }
        }
        _ => 0,
    };
    score_group(cut, hand, flush)
}

#[must_use]
pub fn score_crib(cut: Card, crib: &[Card]) -> ScoreBreakdown {
    let flush = if !crib.is_empty() && crib.iter().all(|c| c.suit == cut.suit) {
        5
    } else {
        0
    };
    score_group(cut, crib, flush)
}

fn score_group(cut: Card, held: &[Card], flush: u8) -> ScoreBreakdown {
    let mut group: SmallVec<[Card; 6]> = SmallVec::from_slice(held);
    group.push(cut);

    let nobs = held.iter().any(|c| c.is_jack() && c.suit == cut.suit);

    ScoreBreakdown {
        fifteens: 2 * fifteen_count(&group),
        pairs: pair_points(&group),
        runs: run_points(&group),
        flush,
        nobs: u8::from(nobs),
    }
}

/// Number of subsets of two or more cards summing to 15.
pub(crate) fn fifteen_count(cards: &[Card]) -> u8 {
    let mut count = 0;
    for k in 2..=cards.len() {
        let Ok(subsets) = Combinations::new(cards, k) else {
            continue;
        };
        count += subsets
            .filter(|s| s.iter().map(|c| c.peg_value()).sum::<u8>() == FIFTEEN)
            .count() as u8;
    }
    count
}

fn value_counts(cards: &[Card]) -> [u8; KING as usize + 1] {
    let mut counts = [0u8; KING as usize + 1];
    for c in cards {
        counts[c.value as usize] += 1;
    }
    counts
}

/// Two points per pair of equal value.
pub(crate) fn pair_points(cards: &[Card]) -> u8 {
    value_counts(cards)
        .iter()
        .map(|&n| n * n.saturating_sub(1))
        .sum()
}

/// Runs of three or more, multiplied out over duplicate values.
pub(crate) fn run_points(cards: &[Card]) -> u8 {
    let counts = value_counts(cards);
    let mut points = 0;
    let mut value = 1;

    while value <= KING as usize {
        if counts[value] == 0 {
            value += 1;
            continue;
        }
        let start = value;
        let mut ways = 1u8;
        while value <= KING as usize && counts[value] > 0 {
            ways *= counts[value];
            value += 1;
        }
        let len = (value - start) as u8;
        if len >= 3 {
            points += len * ways;
        }
    }
    points
}
