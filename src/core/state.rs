//! Game state.
//!
//! A `Game` is the complete, self-contained snapshot of one cribbage game:
//! players and their colors, the deck, hands, crib and pegged cards, scores,
//! the blocking set, the phase, the RNG position and the append-only action
//! log.
//!
//! The action log, blocking set and pegged cards are `im` persistent
//! structures, so cloning a game shares them. The deck, hands and crib are
//! plain `Vec`s holding at most 52 cards between them and are copied. The
//! rules engine clones a game, applies an action to the clone, and commits
//! only on success.
//!
//! ## Card partition
//!
//! At every point the 52 cards are split without overlap across the deck,
//! the hands, the crib and the pegged sequence. The revealed cut card is only
//! peeked and stays in the deck.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{Blocker, PlayerAction};
use super::config::GameConfig;
use super::error::{EngineError, Missing, Result};
use super::player::{ColorMap, Player, PlayerColor, PlayerId, Seat, SeatMap};
use super::rng::{GameRng, GameRngState};
use crate::cards::{Card, Deck};

/// Highest pegging count.
pub const MAX_PEG_COUNT: u8 = 31;

/// Opaque game identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "game {}", self.0)
    }
}

/// Phases of a hand, in order. `CribCounting` loops back to `Deal` until a
/// color wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Deal,
    BuildCrib,
    Cut,
    Pegging,
    Counting,
    CribCounting,
    Done,
}

/// A card on the pegging line and who played it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeggedCard {
    pub card: Card,
    pub player: PlayerId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    players: Vec<Player>,
    colors: SeatMap<PlayerColor>,

    pub(crate) deck: Deck,
    pub(crate) blocking: OrdMap<Seat, Blocker>,
    pub(crate) dealer: Seat,
    pub(crate) scores: ColorMap<u8>,
    pub(crate) lag_scores: ColorMap<u8>,
    pub(crate) phase: Phase,
    pub(crate) hands: SeatMap<Vec<Card>>,
    pub(crate) cut: Option<Card>,
    pub(crate) crib: Vec<Card>,
    pub(crate) pegged: Vector<PeggedCard>,

    /// Index into `pegged` where the current count began.
    pub(crate) series_start: usize,
    /// Seats that have said go in the current count.
    pub(crate) said_go: SmallVec<[Seat; 4]>,

    pub(crate) actions: Vector<PlayerAction>,
    pub(crate) config: GameConfig,
    pub(crate) rng: GameRngState,
}

impl Game {
    /// Create a game with the first player dealing.
    ///
    /// Fails with `InvalidPayload` unless there are 2 to 4 distinct players.
    pub fn new(id: GameId, players: Vec<Player>, config: GameConfig, seed: u64) -> Result<Self> {
        let count = players.len();
        if !(2..=4).contains(&count) {
            return Err(EngineError::invalid_payload(format!(
                "a game needs 2 to 4 players, got {count}"
            )));
        }
        for (i, p) in players.iter().enumerate() {
            if players[..i].iter().any(|q| q.id == p.id) {
                return Err(EngineError::invalid_payload(format!(
                    "{} is seated twice",
                    p.id
                )));
            }
        }

        let dealer = Seat(0);
        let mut blocking = OrdMap::new();
        blocking.insert(dealer, Blocker::DealCards);

        Ok(Self {
            id,
            colors: SeatMap::new(count, |s| PlayerColor::for_seat(s, count)),
            players,
            deck: Deck::new(),
            blocking,
            dealer,
            scores: ColorMap::with_value(0),
            lag_scores: ColorMap::with_value(0),
            phase: Phase::Deal,
            hands: SeatMap::with_default(count),
            cut: None,
            crib: Vec::new(),
            pegged: Vector::new(),
            series_start: 0,
            said_go: SmallVec::new(),
            actions: Vector::new(),
            config,
            rng: GameRng::new(seed).state(),
        })
    }

    // === Players ===

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn seats(&self) -> impl Iterator<Item = Seat> {
        Seat::all(self.players.len())
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn seat_of(&self, player: PlayerId) -> Result<Seat> {
        self.players
            .iter()
            .position(|p| p.id == player)
            .map(|i| Seat(i as u8))
            .ok_or(EngineError::NotFound(Missing::Player(player)))
    }

    #[must_use]
    pub fn color(&self, seat: Seat) -> PlayerColor {
        self.colors[seat]
    }

    pub fn color_of(&self, player: PlayerId) -> Result<PlayerColor> {
        Ok(self.color(self.seat_of(player)?))
    }

    /// Colors in play, without repeats.
    pub fn colors_in_play(&self) -> Vec<PlayerColor> {
        let mut colors: Vec<_> = self.colors.values().copied().collect();
        colors.sort();
        colors.dedup();
        colors
    }

    #[must_use]
    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    // === Progress ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Done
    }

    /// The first color at the winning score, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerColor> {
        self.scores
            .iter()
            .find(|&(_, s)| s >= self.config.winning_score)
            .map(|(c, _)| c)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn score(&self, color: PlayerColor) -> u8 {
        self.scores[color]
    }

    #[must_use]
    pub fn lag_score(&self, color: PlayerColor) -> u8 {
        self.lag_scores[color]
    }

    /// Who must act, and why.
    pub fn blocking(&self) -> impl Iterator<Item = (Seat, Blocker)> + '_ {
        self.blocking.iter().map(|(s, b)| (*s, *b))
    }

    #[must_use]
    pub fn blocker_for(&self, seat: Seat) -> Option<Blocker> {
        self.blocking.get(&seat).copied()
    }

    // === Cards ===

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        &self.hands[seat]
    }

    #[must_use]
    pub fn cut(&self) -> Option<Card> {
        self.cut
    }

    pub fn crib(&self) -> &[Card] {
        &self.crib
    }

    pub fn pegged(&self) -> &Vector<PeggedCard> {
        &self.pegged
    }

    /// Cards dealt to each player.
    #[must_use]
    pub fn deal_size(&self) -> usize {
        if self.player_count() == 2 {
            6
        } else {
            5
        }
    }

    /// Cards each player discards to the crib.
    #[must_use]
    pub fn discard_size(&self) -> usize {
        if self.player_count() == 2 {
            2
        } else {
            1
        }
    }

    /// Cards played since the count last reset.
    pub fn current_series(&self) -> impl Iterator<Item = &PeggedCard> {
        self.pegged.iter().skip(self.series_start)
    }

    /// The running pegging count.
    #[must_use]
    pub fn current_count(&self) -> u8 {
        self.current_series().map(|p| p.card.peg_value()).sum()
    }

    /// Cards in the seat's hand that keep the count at or under 31.
    pub fn legal_pegs(&self, seat: Seat) -> Vec<Card> {
        let count = self.current_count();
        self.hands[seat]
            .iter()
            .copied()
            .filter(|c| count + c.peg_value() <= MAX_PEG_COUNT)
            .collect()
    }

    /// The four cards a player scores at counting time: the ones they pegged.
    pub fn counted_hand(&self, seat: Seat) -> Vec<Card> {
        let id = self.player(seat).id;
        self.pegged
            .iter()
            .filter(|p| p.player == id)
            .map(|p| p.card)
            .collect()
    }

    /// Every card the game holds, across deck, hands, crib and pegged line.
    pub fn all_cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.deck.cards().to_vec();
        cards.extend(self.hands.values().flatten().copied());
        cards.extend(self.crib.iter().copied());
        cards.extend(self.pegged.iter().map(|p| p.card));
        cards
    }

    // === Action log ===

    pub fn actions(&self) -> &Vector<PlayerAction> {
        &self.actions
    }

    #[must_use]
    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }
}
