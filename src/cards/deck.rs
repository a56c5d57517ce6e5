//! The 52-card deck.
//!
//! Cards are drawn from the front. Shuffling uses the game's deterministic
//! `GameRng`, so a deck shuffled from a restored RNG state reproduces the
//! same order.

use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::core::{EngineError, GameRng, Result};

pub const DECK_SIZE: usize = 52;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// A full deck in index order.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cards: (0..DECK_SIZE as u8).filter_map(Card::from_index).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Apply `times` independent permutations.
    pub fn shuffle(&mut self, times: u32, rng: &mut GameRng) {
        for _ in 0..times {
            rng.shuffle(&mut self.cards);
        }
    }

    /// Remove and return `count` cards from the front.
    pub fn draw(&mut self, count: usize) -> Result<Vec<Card>> {
        if count > self.cards.len() {
            return Err(EngineError::EmptyDeck {
                requested: count,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..count).collect())
    }

    /// Reveal the card at `index` without removing it.
    #[must_use]
    pub fn peek(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    /// Put cards back at the bottom.
    pub fn restore(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }
}
