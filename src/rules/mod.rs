//! The game state machine.
//!
//! A game moves through `Deal -> BuildCrib -> Cut -> Pegging -> Counting ->
//! CribCounting` and back to `Deal` with the next dealer, until a color
//! reaches the winning score and the game is `Done`.
//!
//! At every point the game's blocking set says who must act and why. An
//! action names the blocker it resolves; `apply_action` rejects anything
//! else.

mod counting;
mod dealing;
pub mod engine;
pub mod events;
mod pegging;

pub use engine::apply_action;
pub use events::{GameEvent, ScoreReason, Transition};
