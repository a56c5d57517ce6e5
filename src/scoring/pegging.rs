//! Pegging scores.
//!
//! Scores the card just played against the cards played since the count last
//! reset. The played card is the last element of the series.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::MAX_PEG_COUNT;

const FIFTEEN: u8 = 15;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PegScore {
    pub fifteen: u8,
    pub thirty_one: u8,
    /// Trailing cards of equal value: 2 for a pair, 6 for three, 12 for four.
    pub pairs: u8,
    /// Longest trailing run of three or more distinct consecutive values.
    pub run: u8,
}

impl PegScore {
    #[must_use]
    pub fn total(&self) -> u8 {
        self.fifteen + self.thirty_one + self.pairs + self.run
    }
}

/// Points earned by the last card of `series`.
///
/// ```
/// use cribbage_engine::cards::parse_cards;
/// use cribbage_engine::scoring::score_peg;
///
/// let series = parse_cards("4s 5c 6d").unwrap();
/// let score = score_peg(&series);
/// assert_eq!(score.fifteen, 2);
/// assert_eq!(score.run, 3);
/// ```
#[must_use]
pub fn score_peg(series: &[Card]) -> PegScore {
    let Some(last) = series.last() else {
        return PegScore::default();
    };
    let count: u8 = series.iter().map(|c| c.peg_value()).sum();

    let matching = series
        .iter()
        .rev()
        .take_while(|c| c.value == last.value)
        .count() as u8;

    PegScore {
        fifteen: if count == FIFTEEN { 2 } else { 0 },
        thirty_one: if count == MAX_PEG_COUNT { 2 } else { 0 },
        pairs: matching * (matching - 1),
        run: trailing_run(series),
    }
}

fn trailing_run(series: &[Card]) -> u8 {
    (3..=series.len())
        .rev()
        .find(|&len| is_run(&series[series.len() - len..]))
        .map_or(0, |len| len as u8)
}

fn is_run(cards: &[Card]) -> bool {
    let mut values: Vec<u8> = cards.iter().map(|c| c.value).collect();
    values.sort_unstable();
    values.windows(2).all(|w| w[1] == w[0] + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn peg(s: &str) -> PegScore {
        score_peg(&parse_cards(s).unwrap())
    }

    #[test]
    fn test_fifteen_only_when_reached() {
        assert_eq!(peg("4s").fifteen, 0);
        assert_eq!(peg("4s 5c").fifteen, 0);
        assert_eq!(peg("4s 5c 6d").fifteen, 2);
        assert_eq!(peg("4s 5c 6d 2h").fifteen, 0);
    }

    #[test]
    fn test_thirty_one() {
        let score = peg("Ks Qh 5c 6d");
        assert_eq!(score.thirty_one, 2);
        assert_eq!(score.total(), 2);
    }

    #[test]
    fn test_pairs_trailing_only() {
        assert_eq!(peg("7s 7h").pairs, 2);
        assert_eq!(peg("7s 7h 7c").pairs, 6);
        assert_eq!(peg("7s 7h 7c 7d").pairs, 12);
        // a different card breaks the pair
        assert_eq!(peg("7s 2h 7c").pairs, 0);
    }

    #[test]
    fn test_runs_in_any_order() {
        assert_eq!(peg("5s 3h 4c").run, 3);
        assert_eq!(peg("5s 3h 4c 6d").run, 4);
        assert_eq!(peg("2s 5s 3h 4c").run, 4);
        assert_eq!(peg("3h 5s 3c 4d").run, 3);
    }

    #[test]
    fn test_broken_run() {
        // duplicate 3 inside the last four, only the last three form a run
        assert_eq!(peg("3s 4h 3c 5d").run, 3);
        assert_eq!(peg("3s 4h 4c").run, 0);
        assert_eq!(peg("As 2h").run, 0);
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(score_peg(&[]).total(), 0);
    }
}
