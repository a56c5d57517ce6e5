//! Scoring: hands, cribs and pegging.
//!
//! All functions are pure. The rules engine always recomputes scores from the
//! known cut and cards; claimed counts are never trusted.

pub mod hand;
pub mod pegging;

pub use hand::{crib_points, hand_points, score_crib, score_hand, ScoreBreakdown};
pub use pegging::{score_peg, PegScore};
