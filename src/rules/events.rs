//! What an applied action did.
//!
//! Every successful application returns a `Transition` listing the events it
//! produced, in order. Callers turn these into notifications; the engine
//! itself never talks to anyone.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{Phase, PlayerColor, PlayerId};

/// Why points were scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreReason {
    /// Dealer cut a jack.
    HisHeels,
    Fifteen,
    ThirtyOne,
    Pairs,
    Run,
    Go,
    LastCard,
    Hand,
    Crib,
}

impl std::fmt::Display for ScoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self {
            ScoreReason::HisHeels => "his heels",
            ScoreReason::Fifteen => "fifteen",
            ScoreReason::ThirtyOne => "thirty-one",
            ScoreReason::Pairs => "pairs",
            ScoreReason::Run => "a run",
            ScoreReason::Go => "the go",
            ScoreReason::LastCard => "last card",
            ScoreReason::Hand => "their hand",
            ScoreReason::Crib => "the crib",
        };
        f.write_str(what)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Dealt {
        dealer: PlayerId,
    },
    Discarded {
        player: PlayerId,
        cards: usize,
    },
    CutRevealed {
        card: Card,
    },
    Pegged {
        player: PlayerId,
        card: Card,
        count: u8,
    },
    SaidGo {
        player: PlayerId,
    },
    CountReset,
    Scored {
        player: PlayerId,
        color: PlayerColor,
        points: u8,
        reason: ScoreReason,
        total: u8,
    },
    /// A claimed count was wrong; the computed value was applied instead.
    ScoreMismatch {
        player: PlayerId,
        claimed: u8,
        actual: u8,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
    },
    GameWon {
        color: PlayerColor,
    },
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::Dealt { dealer } => write!(f, "{dealer} dealt"),
            GameEvent::Discarded { player, cards } => {
                write!(f, "{player} put {cards} card(s) in the crib")
            }
            GameEvent::CutRevealed { card } => write!(f, "cut card is {card}"),
            GameEvent::Pegged {
                player,
                card,
                count,
            } => write!(f, "{player} played {card} for {count}"),
            GameEvent::SaidGo { player } => write!(f, "{player} said go"),
            GameEvent::CountReset => f.write_str("count reset to 0"),
            GameEvent::Scored {
                player,
                color,
                points,
                reason,
                total,
            } => write!(
                f,
                "{player} scored {points} for {reason} ({color} now has {total})"
            ),
            GameEvent::ScoreMismatch {
                player,
                claimed,
                actual,
            } => write!(f, "{player} claimed {claimed} but gets {actual}"),
            GameEvent::PhaseChanged { from, to } => write!(f, "phase {from:?} -> {to:?}"),
            GameEvent::GameWon { color } => write!(f, "{color} wins"),
        }
    }
}

/// Events produced by one applied action.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub events: Vec<GameEvent>,
}

impl Transition {
    pub(crate) fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Points scored, per reason, in the order they were awarded.
    pub fn scores(&self) -> impl Iterator<Item = (PlayerColor, u8, ScoreReason)> + '_ {
        self.events.iter().filter_map(|e| match e {
            GameEvent::Scored {
                color,
                points,
                reason,
                ..
            } => Some((*color, *points, *reason)),
            _ => None,
        })
    }

    /// Total points awarded to `color`.
    #[must_use]
    pub fn points_for(&self, color: PlayerColor) -> u8 {
        self.scores()
            .filter(|(c, _, _)| *c == color)
            .map(|(_, p, _)| p)
            .sum()
    }

    #[must_use]
    pub fn has_mismatch(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::ScoreMismatch { .. }))
    }

    /// Messages for score notifications.
    pub fn score_messages(&self) -> Vec<String> {
        self.events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::Scored { .. } | GameEvent::ScoreMismatch { .. }
                )
            })
            .map(ToString::to_string)
            .collect()
    }

    /// Messages for everything else.
    pub fn messages(&self) -> Vec<String> {
        self.events
            .iter()
            .filter(|e| {
                !matches!(
                    e,
                    GameEvent::Scored { .. } | GameEvent::ScoreMismatch { .. }
                )
            })
            .map(ToString::to_string)
            .collect()
    }
}
