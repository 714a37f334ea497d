//! Draw order for one frame of the world.

use super::{palette, RenderSurface};
use crate::core::config::CollisionPolicy;
use crate::core::constants::*;
use crate::game::World;

/// Draw the whole world: entities, ground, HUD, then the game-over overlay.
pub fn draw_world<S: RenderSurface + ?Sized>(world: &World, surface: &mut S) {
    let width = world.config.canvas_width;
    let height = world.config.canvas_height;

    surface.clear();

    for obstacle in &world.obstacles {
        surface.fill_rect(
            obstacle.x,
            obstacle.y,
            obstacle.width,
            obstacle.height,
            palette::OBSTACLE,
        );
    }

    for item in &world.items {
        let color = if item.heal {
            palette::HEAL_ITEM
        } else {
            palette::SCORE_ITEM
        };
        surface.fill_circle(item.x, item.y, item.radius, color);
    }

    let player = &world.player;
    surface.fill_rect(
        player.x,
        player.y,
        player.width,
        player.height,
        palette::PLAYER,
    );

    surface.fill_rect(
        0.0,
        world.ground_y,
        width,
        height - world.ground_y,
        palette::GROUND,
    );

    for (line, y) in hud_lines(world).iter().zip(HUD_LINE_Y) {
        surface.fill_text(HUD_X, y, line, HUD_FONT_PX, palette::HUD_TEXT);
    }

    if world.is_game_over() {
        surface.fill_rect(0.0, 0.0, width, height, palette::GAME_OVER_DIM);
        surface.fill_text(
            width / 2.0 - GAME_OVER_TEXT_OFFSET_X,
            height / 2.0,
            "Game Over",
            GAME_OVER_FONT_PX,
            palette::HUD_TEXT,
        );
    }
}

/// HUD rows for the active rules. Health and distance only show where
/// they mean something.
pub fn hud_lines(world: &World) -> Vec<String> {
    let mut lines = vec![format!("Score: {}", world.score)];
    if world.config.rules.collision == CollisionPolicy::Health {
        lines.push(format!("Health: {}", world.health));
    }
    if world.config.rules.spawn.tracks_distance() {
        lines.push(format!("Distance: {}", world.distance.floor() as u64));
    }
    lines
}
