//! Playing cards.
//!
//! A card is a suit and a value from 1 (ace) to 13 (king). Its *peg value*,
//! used for fifteens and the pegging count, collapses ten and the face cards
//! to 10.
//!
//! The derived ordering (value, then suit) exists for canonical display and
//! tie-breaking only. It has no gameplay meaning.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::{EngineError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Clubs,
    Diamonds,
    Hearts,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Clubs, Suit::Diamonds, Suit::Hearts];

    fn glyph(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
        }
    }

    fn parse(s: &str) -> Option<Suit> {
        match s {
            "S" | "s" | "♠" | "♤" => Some(Suit::Spades),
            "C" | "c" | "♣" | "♧" => Some(Suit::Clubs),
            "D" | "d" | "♦" | "♢" => Some(Suit::Diamonds),
            "H" | "h" | "♥" | "♡" => Some(Suit::Hearts),
            _ => None,
        }
    }
}

pub const ACE: u8 = 1;
pub const JACK: u8 = 11;
pub const KING: u8 = 13;

/// A single playing card.
///
/// ```
/// use cribbage_engine::cards::{Card, Suit};
///
/// let jack: Card = "Jd".parse().unwrap();
/// assert_eq!(jack, Card::new(11, Suit::Diamonds));
/// assert_eq!(jack.peg_value(), 10);
/// assert_eq!(jack.to_string(), "J♦");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub value: u8,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(value: u8, suit: Suit) -> Self {
        assert!(value >= ACE && value <= KING, "card value must be 1..=13");
        Self { value, suit }
    }

    /// Card for a dense index in `0..52` (`suit * 13 + value - 1`).
    #[must_use]
    pub fn from_index(index: u8) -> Option<Card> {
        if index >= 52 {
            return None;
        }
        let suit = Suit::ALL[(index / 13) as usize];
        Some(Card::new(index % 13 + 1, suit))
    }

    #[must_use]
    pub fn index(self) -> u8 {
        self.suit as u8 * 13 + self.value - 1
    }

    /// Value for fifteens and the pegging count.
    #[must_use]
    pub const fn peg_value(self) -> u8 {
        if self.value >= 10 {
            10
        } else {
            self.value
        }
    }

    #[must_use]
    pub const fn is_jack(self) -> bool {
        self.value == JACK
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value {
            1 => f.write_str("A")?,
            11 => f.write_str("J")?,
            12 => f.write_str("Q")?,
            13 => f.write_str("K")?,
            v => write!(f, "{v}")?,
        }
        write!(f, "{}", self.suit.glyph())
    }
}

impl FromStr for Card {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let split = s
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .ok_or_else(|| EngineError::invalid_payload("empty card"))?;
        let (value, suit) = s.split_at(split);

        let suit = Suit::parse(suit)
            .ok_or_else(|| EngineError::invalid_payload(format!("bad suit in card {s:?}")))?;
        let value = match value {
            "A" | "a" => ACE,
            "J" | "j" => JACK,
            "Q" | "q" => 12,
            "K" | "k" => KING,
            digits => digits
                .parse::<u8>()
                .ok()
                .filter(|v| (2..=10).contains(v))
                .ok_or_else(|| EngineError::invalid_payload(format!("bad value in card {s:?}")))?,
        };

        Ok(Card::new(value, suit))
    }
}

/// Parse whitespace-separated cards, e.g. `"7s 7c 8s 8c"`.
pub fn parse_cards(s: &str) -> Result<Vec<Card>> {
    s.split_whitespace().map(str::parse).collect()
}
