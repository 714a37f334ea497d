//! Side-scrolling flap-and-dodge game.
//!
//! The player hangs at a fixed column while obstacles and items scroll in
//! from the right. Gravity pulls the player down each frame; a jump sets an
//! upward velocity. Obstacles cost health (or end the run outright, depending
//! on the rule set) and items add score or restore health.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
