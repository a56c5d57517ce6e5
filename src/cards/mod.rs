//! Card and deck model.
//!
//! - `Card`: suit × value with a peg value for counting
//! - `Deck`: the 52 distinct cards, shuffled and drawn from the front

pub mod card;
pub mod deck;

pub use card::{parse_cards, Card, Suit, ACE, JACK, KING};
pub use deck::{Deck, DECK_SIZE};
