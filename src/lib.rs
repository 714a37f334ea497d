//! Sidescroll - a terminal side-scrolling game.
//!
//! This module exposes the simulation, rendering and front-end pieces for
//! the binaries and tests.

pub mod core;
pub mod game;
pub mod input;
pub mod render;
pub mod simulator;
pub mod ui;
pub mod utils;
