//! Side-scroller game logic: per-frame step, jump handling, collisions.

use super::types::*;
use crate::core::config::{CollisionPolicy, JumpPolicy, SpawnPolicy};
use crate::core::constants::*;
use crate::render::{draw_world, CommandList};
use rand::Rng;

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Jump,    // Space or Up arrow
    Restart, // r, only meaningful after game over
    Quit,    // Esc or q
    Other,
}

/// What one step produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Draw calls for this frame, in order.
    pub commands: CommandList,
    /// True once the world has reached its terminal state. The frame driver
    /// must stop stepping.
    pub game_over: bool,
}

/// Latch a jump request until the next step. Repeats before then are no-ops.
pub fn on_jump_requested(world: &mut World) {
    if !world.is_game_over() {
        world.jump_pending = true;
    }
}

/// Apply a flap impulse. Returns whether the flap happened.
pub fn jump(player: &mut Player, policy: JumpPolicy) -> bool {
    if policy == JumpPolicy::SingleFlap && player.airborne {
        return false;
    }
    player.vy = FLAP_STRENGTH;
    player.airborne = true;
    true
}

/// Advance the world by one frame and render it.
///
/// `dt_ms` is wall time since the previous call. It only feeds the timed
/// spawn clock and distance; motion is per frame.
pub fn advance<R: Rng>(
    world: &mut World,
    dt_ms: f64,
    jump_requested: bool,
    rng: &mut R,
) -> StepOutcome {
    if !world.is_game_over() {
        step(world, dt_ms, jump_requested, rng);
    }

    let mut commands = CommandList::new();
    draw_world(world, &mut commands);

    StepOutcome {
        commands,
        game_over: world.is_game_over(),
    }
}

fn step<R: Rng>(world: &mut World, dt_ms: f64, jump_requested: bool, rng: &mut R) {
    let dt = sanitize_dt(dt_ms, world.frame_count);
    world.frame_count += 1;

    // 0. Consume input latched since the last frame
    if jump_requested || world.jump_pending {
        jump(&mut world.player, world.config.rules.jump);
        world.jump_pending = false;
    }

    // 1. Clock and distance
    world.clock.elapsed_ms += dt;
    if world.config.rules.spawn.tracks_distance() {
        world.distance += SCROLL_SPEED * (dt / FRAME_MS);
    }

    // 2. Spawn
    spawn_entities(world, rng);

    // 3-4. Scroll and drop what left the screen
    scroll_obstacles(world);
    scroll_items(world);

    // 5. Gravity and ground
    apply_physics(&mut world.player, world.ground_y);

    // 6-7. Collisions
    resolve_obstacle_collisions(world);
    collect_items(world);
}

/// Elapsed time the step may trust. The first frame uses the nominal frame
/// since the driver's baseline timestamp predates it.
pub fn sanitize_dt(dt_ms: f64, frame_count: u64) -> f64 {
    if frame_count == 0 || !dt_ms.is_finite() {
        return FRAME_MS;
    }
    dt_ms.clamp(0.0, MAX_FRAME_MS)
}

fn spawn_entities<R: Rng>(world: &mut World, rng: &mut R) {
    match world.config.rules.spawn {
        SpawnPolicy::Timed {
            obstacle_interval_ms,
            item_interval_ms,
        } => {
            let now = world.clock.elapsed_ms;
            if now - world.clock.last_obstacle_ms >= obstacle_interval_ms {
                world.spawn_obstacle(rng);
                world.clock.last_obstacle_ms = now;
            }
            if now - world.clock.last_item_ms >= item_interval_ms {
                world.spawn_item(rng);
                world.clock.last_item_ms = now;
            }
        }
        SpawnPolicy::Chance {
            obstacle_chance,
            item_chance,
        } => {
            if rng.gen_bool(obstacle_chance) {
                world.spawn_obstacle(rng);
            }
            if rng.gen_bool(item_chance) {
                world.spawn_item(rng);
            }
        }
    }
}

/// Move every obstacle left and drop the ones fully off screen.
pub fn scroll_obstacles(world: &mut World) {
    for obstacle in &mut world.obstacles {
        obstacle.x -= SCROLL_SPEED;
    }
    world.obstacles.retain(|o| !o.is_off_screen());
}

/// Move every item left and drop the ones fully off screen.
pub fn scroll_items(world: &mut World) {
    for item in &mut world.items {
        item.x -= SCROLL_SPEED;
    }
    world.items.retain(|i| !i.is_off_screen());
}

/// Integrate gravity and clamp to the ground line.
pub fn apply_physics(player: &mut Player, ground_y: f64) {
    player.vy += GRAVITY;
    player.y += player.vy;

    if player.bottom() >= ground_y {
        player.y = ground_y - player.height;
        player.vy = 0.0;
        player.airborne = false;
    }
}

/// Strict AABB overlap; touching edges do not collide.
pub fn hits_obstacle(player: &Player, obstacle: &Obstacle) -> bool {
    player.x < obstacle.x + obstacle.width
        && player.x + player.width > obstacle.x
        && player.y < obstacle.y + obstacle.height
        && player.y + player.height > obstacle.y
}

/// Circle test against the player's centre, using half the player width.
pub fn touches_item(player: &Player, item: &Item) -> bool {
    let (px, py) = player.center();
    let dx = px - item.x;
    let dy = py - item.y;
    (dx * dx + dy * dy).sqrt() < item.radius + player.width / 2.0
}

/// Remove every obstacle overlapping the player and charge one hit each,
/// stopping once a hit ends the game.
pub fn resolve_obstacle_collisions(world: &mut World) {
    let player = world.player;
    let before = world.obstacles.len();
    world.obstacles.retain(|o| !hits_obstacle(&player, o));
    let hits = before - world.obstacles.len();

    for _ in 0..hits {
        if world.is_game_over() {
            break;
        }
        register_hit(world);
    }
}

fn register_hit(world: &mut World) {
    world.hits_taken += 1;

    match world.config.rules.collision {
        CollisionPolicy::Health => {
            world.health = world.health.saturating_sub(1);
            tracing::info!(health = world.health, "obstacle hit");
            if world.health == 0 {
                end_game(world);
            }
        }
        CollisionPolicy::SingleHit => {
            tracing::info!("obstacle hit");
            end_game(world);
        }
    }
}

/// Pick up every item touching the player. Nothing is collected once the
/// game is over.
pub fn collect_items(world: &mut World) {
    if world.is_game_over() {
        return;
    }

    let player = world.player;
    let (collected, remaining): (Vec<Item>, Vec<Item>) = std::mem::take(&mut world.items)
        .into_iter()
        .partition(|item| touches_item(&player, item));
    world.items = remaining;

    for item in collected {
        if item.heal {
            if world.health < MAX_HEALTH {
                world.health += 1;
            }
            tracing::debug!(health = world.health, "heal item collected");
        } else {
            world.score += 1;
            tracing::debug!(score = world.score, "score item collected");
        }
    }
}

fn end_game(world: &mut World) {
    if world.is_game_over() {
        return;
    }
    world.phase = Phase::GameOver;
    world.jump_pending = false;
    tracing::info!(
        score = world.score,
        distance = world.distance.floor(),
        frames = world.frame_count,
        "game over"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{GameConfig, RuleSet};
    use crate::render::DrawCommand;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn world(rules: RuleSet) -> World {
        World::new(GameConfig::with_rules(rules)).unwrap()
    }

    /// Rules with spawning switched off so tests control every entity.
    fn quiet(rules: RuleSet) -> RuleSet {
        RuleSet {
            spawn: SpawnPolicy::Chance {
                obstacle_chance: 0.0,
                item_chance: 0.0,
            },
            ..rules
        }
    }

    /// An obstacle sitting right on top of the resting player.
    fn obstacle_on_player(world: &World) -> Obstacle {
        Obstacle {
            x: world.player.x,
            y: world.ground_y - 40.0,
            width: 30.0,
            height: 40.0,
        }
    }

    fn item_on_player(world: &World, heal: bool) -> Item {
        let (x, y) = world.player.center();
        Item {
            x,
            y,
            radius: ITEM_RADIUS,
            heal,
        }
    }

    // ── Jump ──

    #[test]
    fn test_jump_sets_flap_strength() {
        let mut player = Player::on_ground(350.0);
        assert!(jump(&mut player, JumpPolicy::MultiFlap));
        assert_eq!(player.vy, FLAP_STRENGTH);
        assert!(player.airborne);
    }

    #[test]
    fn test_multi_flap_allows_air_jumps() {
        let mut player = Player::on_ground(350.0);
        jump(&mut player, JumpPolicy::MultiFlap);
        apply_physics(&mut player, 350.0);
        assert!(player.vy > FLAP_STRENGTH);

        assert!(jump(&mut player, JumpPolicy::MultiFlap));
        assert_eq!(player.vy, FLAP_STRENGTH);
    }

    #[test]
    fn test_single_flap_blocks_air_jumps() {
        let mut player = Player::on_ground(350.0);
        assert!(jump(&mut player, JumpPolicy::SingleFlap));
        apply_physics(&mut player, 350.0);
        let vy = player.vy;

        assert!(!jump(&mut player, JumpPolicy::SingleFlap));
        assert_eq!(player.vy, vy);
    }

    #[test]
    fn test_single_flap_rearms_on_landing() {
        let mut player = Player::on_ground(350.0);
        jump(&mut player, JumpPolicy::SingleFlap);
        for _ in 0..100 {
            apply_physics(&mut player, 350.0);
            if !player.airborne {
                break;
            }
        }
        assert!(!player.airborne);
        assert!(jump(&mut player, JumpPolicy::SingleFlap));
    }

    #[test]
    fn test_pending_jump_consumed_once() {
        let mut world = world(quiet(RuleSet::classic()));
        let mut rng = rng();
        on_jump_requested(&mut world);
        on_jump_requested(&mut world);
        assert!(world.jump_pending);

        advance(&mut world, 16.0, false, &mut rng);
        assert!(!world.jump_pending);
        assert_eq!(world.player.vy, FLAP_STRENGTH + GRAVITY);

        advance(&mut world, 16.0, false, &mut rng);
        assert!((world.player.vy - (FLAP_STRENGTH + 2.0 * GRAVITY)).abs() < 1e-9);
    }

    #[test]
    fn test_jump_ignored_after_game_over() {
        let mut world = world(RuleSet::classic());
        world.phase = Phase::GameOver;
        on_jump_requested(&mut world);
        assert!(!world.jump_pending);
    }

    // ── Physics ──

    #[test]
    fn test_gravity_accumulates_in_air() {
        let mut player = Player::on_ground(350.0);
        player.y = 100.0;
        apply_physics(&mut player, 350.0);
        assert_eq!(player.vy, GRAVITY);
        assert_eq!(player.y, 100.0 + GRAVITY);
    }

    #[test]
    fn test_ground_clamp_resets_velocity() {
        let mut player = Player::on_ground(350.0);
        player.y = 305.0;
        player.vy = 20.0;
        player.airborne = true;
        apply_physics(&mut player, 350.0);
        assert_eq!(player.bottom(), 350.0);
        assert_eq!(player.vy, 0.0);
        assert!(!player.airborne);
    }

    #[test]
    fn test_resting_player_stays_put() {
        let mut player = Player::on_ground(350.0);
        for _ in 0..10 {
            apply_physics(&mut player, 350.0);
        }
        assert_eq!(player.bottom(), 350.0);
        assert_eq!(player.vy, 0.0);
    }

    // ── Time ──

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(5000.0, 0), FRAME_MS);
        assert_eq!(sanitize_dt(-3.0, 5), 0.0);
        assert_eq!(sanitize_dt(f64::NAN, 5), FRAME_MS);
        assert_eq!(sanitize_dt(f64::INFINITY, 5), FRAME_MS);
        assert_eq!(sanitize_dt(20.0, 5), 20.0);
        assert_eq!(sanitize_dt(250.0, 5), MAX_FRAME_MS);
    }

    #[test]
    fn test_distance_accrues_per_16ms() {
        let mut world = world(RuleSet::classic());
        let mut rng = rng();
        advance(&mut world, 9999.0, false, &mut rng); // first frame -> 16ms
        assert!((world.distance - SCROLL_SPEED).abs() < 1e-9);
        advance(&mut world, 32.0, false, &mut rng);
        assert!((world.distance - 3.0 * SCROLL_SPEED).abs() < 1e-9);
    }

    #[test]
    fn test_chance_rules_have_no_distance() {
        let mut world = world(RuleSet::arcade());
        let mut rng = rng();
        for _ in 0..10 {
            advance(&mut world, 16.0, false, &mut rng);
        }
        assert_eq!(world.distance, 0.0);
    }

    // ── Spawning ──

    #[test]
    fn test_timed_spawn_intervals() {
        let mut world = world(RuleSet::classic());
        let mut rng = rng();

        // 1496ms: nothing yet
        advance(&mut world, 10.0, false, &mut rng);
        for _ in 0..148 {
            advance(&mut world, 10.0, false, &mut rng);
        }
        assert!((world.clock.elapsed_ms - 1496.0).abs() < 1e-9);
        assert!(world.obstacles.is_empty());

        advance(&mut world, 4.0, false, &mut rng);
        assert_eq!(world.obstacles.len(), 1);
        assert!(world.items.is_empty());

        // Next obstacle waits a full interval again
        advance(&mut world, 100.0, false, &mut rng);
        assert_eq!(world.obstacles.len(), 1);
    }

    #[test]
    fn test_timed_item_spawn_at_2000ms() {
        let mut world = world(RuleSet::classic());
        let mut rng = rng();
        advance(&mut world, 16.0, false, &mut rng);
        while world.clock.elapsed_ms + 16.0 < 2000.0 {
            advance(&mut world, 16.0, false, &mut rng);
        }
        assert!(world.items.is_empty());
        let rest = 2000.0 - world.clock.elapsed_ms;
        advance(&mut world, rest, false, &mut rng);
        assert_eq!(world.items.len(), 1);
    }

    #[test]
    fn test_chance_spawn_certain() {
        let rules = RuleSet {
            spawn: SpawnPolicy::Chance {
                obstacle_chance: 1.0,
                item_chance: 1.0,
            },
            ..RuleSet::arcade()
        };
        let mut world = world(rules);
        let mut rng = rng();
        advance(&mut world, 16.0, false, &mut rng);
        assert_eq!(world.obstacles.len(), 1);
        assert_eq!(world.items.len(), 1);
        // Spawned this frame and already scrolled once
        assert_eq!(world.obstacles[0].x, world.spawn_x() - SCROLL_SPEED);
    }

    // ── Scrolling ──

    #[test]
    fn test_scroll_filters_every_off_screen_entity() {
        let mut world = world(RuleSet::classic());
        let template = Obstacle {
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 4.0,
        };
        world.obstacles = vec![
            Obstacle { x: 0.0, ..template },
            Obstacle { x: 50.0, ..template },
            Obstacle { x: -1.0, ..template },
        ];
        scroll_obstacles(&mut world);
        assert_eq!(world.obstacles.len(), 1);
        assert_eq!(world.obstacles[0].x, 46.0);
    }

    #[test]
    fn test_scroll_items_uses_radius() {
        let mut world = world(RuleSet::classic());
        world.items = vec![
            Item {
                x: -6.0,
                y: 0.0,
                radius: 10.0,
                heal: false,
            },
            Item {
                x: -5.5,
                y: 0.0,
                radius: 10.0,
                heal: false,
            },
        ];
        scroll_items(&mut world);
        assert_eq!(world.items.len(), 1);
        assert_eq!(world.items[0].x, -9.5);
    }

    // ── Collisions ──

    #[test]
    fn test_aabb_edges_do_not_touch() {
        let player = Player::on_ground(350.0);
        let touching = Obstacle {
            x: player.x + player.width,
            y: player.y,
            width: 10.0,
            height: 10.0,
        };
        assert!(!hits_obstacle(&player, &touching));
        let overlapping = Obstacle {
            x: touching.x - 0.5,
            ..touching
        };
        assert!(hits_obstacle(&player, &overlapping));
    }

    #[test]
    fn test_hit_costs_one_health() {
        let mut world = world(RuleSet::classic());
        world.obstacles.push(obstacle_on_player(&world));
        resolve_obstacle_collisions(&mut world);
        assert_eq!(world.health, MAX_HEALTH - 1);
        assert!(world.obstacles.is_empty());
        assert!(!world.is_game_over());
        assert_eq!(world.hits_taken, 1);
    }

    #[test]
    fn test_last_health_point_ends_game() {
        let mut world = world(RuleSet::classic());
        world.health = 1;
        world.obstacles.push(obstacle_on_player(&world));
        resolve_obstacle_collisions(&mut world);
        assert_eq!(world.health, 0);
        assert!(world.is_game_over());
    }

    #[test]
    fn test_simultaneous_hits_stop_at_fatal_one() {
        let mut world = world(RuleSet::classic());
        for _ in 0..5 {
            world.obstacles.push(obstacle_on_player(&world));
        }
        resolve_obstacle_collisions(&mut world);
        assert_eq!(world.health, 0);
        assert_eq!(world.hits_taken, MAX_HEALTH);
        assert!(world.is_game_over());
        assert!(world.obstacles.is_empty());
    }

    #[test]
    fn test_single_hit_counts_one_of_two_overlaps() {
        let mut world = world(RuleSet::arcade());
        let first = obstacle_on_player(&world);
        world.obstacles.push(first);
        world.obstacles.push(Obstacle {
            x: first.x + 5.0,
            ..first
        });
        resolve_obstacle_collisions(&mut world);
        assert!(world.is_game_over());
        assert_eq!(world.hits_taken, 1);
        assert_eq!(world.health, MAX_HEALTH);
    }

    #[test]
    fn test_single_hit_ends_game_immediately() {
        let mut world = world(RuleSet::arcade());
        world.obstacles.push(obstacle_on_player(&world));
        resolve_obstacle_collisions(&mut world);
        assert!(world.is_game_over());
        assert_eq!(world.health, MAX_HEALTH);
        assert!(world.obstacles.is_empty());
    }

    #[test]
    fn test_score_item_collected_once() {
        let mut world = world(RuleSet::classic());
        world.items.push(item_on_player(&world, false));
        collect_items(&mut world);
        assert_eq!(world.score, 1);
        assert!(world.items.is_empty());

        collect_items(&mut world);
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_heal_item_restores_health() {
        let mut world = world(RuleSet::classic());
        world.health = 1;
        world.items.push(item_on_player(&world, true));
        collect_items(&mut world);
        assert_eq!(world.health, 2);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_heal_item_at_full_health_is_spent() {
        let mut world = world(RuleSet::classic());
        world.items.push(item_on_player(&world, true));
        collect_items(&mut world);
        assert_eq!(world.health, MAX_HEALTH);
        assert_eq!(world.score, 0);
        assert!(world.items.is_empty());
    }

    #[test]
    fn test_item_reach_is_radius_plus_half_width() {
        let mut world = world(RuleSet::classic());
        let (cx, cy) = world.player.center();
        let reach = ITEM_RADIUS + world.player.width / 2.0;
        world.items.push(Item {
            x: cx + reach,
            y: cy,
            radius: ITEM_RADIUS,
            heal: false,
        });
        collect_items(&mut world);
        assert_eq!(world.score, 0);

        world.items[0].x -= 0.01;
        collect_items(&mut world);
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_no_pickups_after_fatal_hit() {
        let mut world = world(quiet(RuleSet::classic()));
        world.health = 1;
        world.obstacles.push(obstacle_on_player(&world));
        world.items.push(item_on_player(&world, true));
        // Scrolling moves both by SCROLL_SPEED; still overlapping.
        let outcome = advance(&mut world, 16.0, false, &mut rng());
        assert!(outcome.game_over);
        assert_eq!(world.health, 0);
        assert_eq!(world.items.len(), 1);
    }

    // ── Terminal state ──

    #[test]
    fn test_game_over_world_is_frozen() {
        let mut world = world(RuleSet::classic());
        let mut rng = rng();
        world.phase = Phase::GameOver;
        world.player.y = 10.0;
        let frames = world.frame_count;

        let outcome = advance(&mut world, 16.0, true, &mut rng);
        assert!(outcome.game_over);
        assert_eq!(world.frame_count, frames);
        assert_eq!(world.player.y, 10.0);
        assert!(outcome.commands.texts().any(|t| t == "Game Over"));
    }

    #[test]
    fn test_advance_renders_frame() {
        let mut world = world(RuleSet::classic());
        let outcome = advance(&mut world, 16.0, false, &mut rng());
        assert!(!outcome.game_over);
        assert_eq!(outcome.commands.commands()[0], DrawCommand::Clear);
        assert!(outcome.commands.texts().any(|t| t == "Score: 0"));
    }
}
