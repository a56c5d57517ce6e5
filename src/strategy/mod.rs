//! Decision making: discard advice and computer players.

pub mod advisor;
pub mod npc;

pub use advisor::{best_discard, best_static_discard, crib_estimate, Discard, KEEP_SIZE};
pub use npc::{Mode, Npc};
