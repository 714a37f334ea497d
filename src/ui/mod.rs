//! Terminal presentation layer.

pub mod canvas;
pub mod game_scene;

pub use game_scene::render_game_scene;
