//! Players, seats and colors.
//!
//! ## PlayerId
//!
//! Opaque identity supplied by the caller. The engine never interprets it.
//!
//! ## Seat
//!
//! 0-based position at the table. Turn order, dealing and the dealer role all
//! move clockwise through seats.
//!
//! ## SeatMap / ColorMap
//!
//! Per-seat and per-color storage backed by plain arrays/`Vec` for O(1)
//! access, indexable by `Seat` and `PlayerColor`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Opaque player identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// A registered player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Position at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Seat(pub u8);

impl Seat {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat to the left (clockwise).
    #[must_use]
    pub fn next(self, seat_count: usize) -> Seat {
        Seat(((self.index() + 1) % seat_count) as u8)
    }

    /// Every seat, starting with the one after `self` and ending with `self`.
    ///
    /// ```
    /// use cribbage_engine::core::Seat;
    ///
    /// let order: Vec<_> = Seat(1).clockwise_from(3).collect();
    /// assert_eq!(order, vec![Seat(2), Seat(0), Seat(1)]);
    /// ```
    pub fn clockwise_from(self, seat_count: usize) -> impl Iterator<Item = Seat> {
        let start = self.index();
        (1..=seat_count).map(move |offset| Seat(((start + offset) % seat_count) as u8))
    }

    pub fn all(seat_count: usize) -> impl Iterator<Item = Seat> {
        (0..seat_count as u8).map(Seat)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

/// Per-seat data with O(1) access.
///
/// ```
/// use cribbage_engine::core::{Seat, SeatMap};
///
/// let mut hands: SeatMap<Vec<u8>> = SeatMap::with_default(2);
/// hands[Seat(1)].push(7);
/// assert!(hands[Seat(0)].is_empty());
/// assert_eq!(hands[Seat(1)], vec![7]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: Vec<T>,
}

impl<T> SeatMap<T> {
    /// Create with values from a factory function.
    pub fn new(seat_count: usize, factory: impl Fn(Seat) -> T) -> Self {
        assert!(seat_count > 0, "Must have at least 1 seat");
        assert!(seat_count <= 255, "At most 255 seats supported");

        let data = (0..seat_count as u8).map(|i| factory(Seat(i))).collect();
        Self { data }
    }

    pub fn with_default(seat_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(seat_count, |_| T::default())
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.data.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        &self.data[seat.index()]
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        &mut self.data[seat.index()]
    }
}

/// Peg color. Scores are kept per color, so partners share one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Green,
    Blue,
    Red,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 3] = [PlayerColor::Green, PlayerColor::Blue, PlayerColor::Red];

    /// Color for `seat` in a game of `seat_count` players.
    ///
    /// Four players play as partners across the table.
    #[must_use]
    pub fn for_seat(seat: Seat, seat_count: usize) -> PlayerColor {
        match (seat_count, seat.index()) {
            (4, i) if i % 2 == 0 => PlayerColor::Blue,
            (4, _) => PlayerColor::Red,
            (_, 0) => PlayerColor::Blue,
            (_, 1) => PlayerColor::Red,
            _ => PlayerColor::Green,
        }
    }

    const fn slot(self) -> usize {
        match self {
            PlayerColor::Green => 0,
            PlayerColor::Blue => 1,
            PlayerColor::Red => 2,
        }
    }
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlayerColor::Green => "green",
            PlayerColor::Blue => "blue",
            PlayerColor::Red => "red",
        };
        f.write_str(name)
    }
}

/// Per-color data, one slot for each of the three colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; 3],
}

impl<T: Copy> ColorMap<T> {
    pub fn with_value(value: T) -> Self {
        Self { data: [value; 3] }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerColor, T)> + '_ {
        PlayerColor::ALL.into_iter().map(|c| (c, self.data[c.slot()]))
    }
}

impl<T> Index<PlayerColor> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: PlayerColor) -> &Self::Output {
        &self.data[color.slot()]
    }
}

impl<T> IndexMut<PlayerColor> for ColorMap<T> {
    fn index_mut(&mut self, color: PlayerColor) -> &mut Self::Output {
        &mut self.data[color.slot()]
    }
}
