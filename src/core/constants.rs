// Frame timing
pub const FRAME_MS: f64 = 16.0; // nominal frame, also the distance normalization unit
pub const MAX_FRAME_MS: f64 = 100.0; // clamp after pause/lag
pub const REALTIME_FRAME_MS: u64 = 16; // ~60 FPS poll interval for the terminal loop

// Physics (units per frame, units per frame²)
pub const GRAVITY: f64 = 0.6;
pub const FLAP_STRENGTH: f64 = -12.0;
pub const SCROLL_SPEED: f64 = 4.0;

// Canvas
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 400.0;
pub const GROUND_MARGIN: f64 = 50.0; // GROUND_Y = canvas height - GROUND_MARGIN

// Player geometry
pub const PLAYER_X: f64 = 100.0;
pub const PLAYER_WIDTH: f64 = 30.0;
pub const PLAYER_HEIGHT: f64 = 40.0;

// Health
pub const MAX_HEALTH: u32 = 3;

// Spawning: both entity kinds enter just past the right edge
pub const SPAWN_X_OFFSET: f64 = 20.0;
pub const OBSTACLE_SPAWN_INTERVAL_MS: f64 = 1500.0;
pub const ITEM_SPAWN_INTERVAL_MS: f64 = 2000.0;
pub const OBSTACLE_SPAWN_CHANCE: f64 = 0.02;
pub const ITEM_SPAWN_CHANCE: f64 = 0.02;

// Obstacle dimensions: min + uniform[0, span)
pub const OBSTACLE_MIN_HEIGHT: f64 = 30.0;
pub const OBSTACLE_HEIGHT_SPAN: f64 = 40.0;
pub const OBSTACLE_MIN_WIDTH: f64 = 20.0;
pub const OBSTACLE_WIDTH_SPAN: f64 = 30.0;

// Items float in a band 80..200 above the ground
pub const ITEM_RADIUS: f64 = 10.0;
pub const ITEM_MIN_LIFT: f64 = 80.0;
pub const ITEM_LIFT_SPAN: f64 = 120.0;
pub const HEAL_ITEM_CHANCE: f64 = 0.5;

// HUD layout
pub const HUD_FONT_PX: u16 = 16;
pub const HUD_X: f64 = 10.0;
pub const HUD_LINE_Y: [f64; 3] = [20.0, 40.0, 60.0];
pub const GAME_OVER_FONT_PX: u16 = 40;
pub const GAME_OVER_TEXT_OFFSET_X: f64 = 100.0;
