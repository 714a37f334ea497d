//! Immediate-mode drawing contract between the simulation and a display.
//!
//! The simulation never talks to a terminal directly. It sequences draw
//! calls against a [`RenderSurface`]; [`CommandList`] records them so a
//! step can hand its frame to whichever surface the front end owns.

pub mod scene;

pub use scene::draw_world;

/// RGBA color in 0..=255 channels with a 0.0..=1.0 alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Composite `self` over an opaque `(r, g, b)` background.
    pub fn over(&self, background: (u8, u8, u8)) -> (u8, u8, u8) {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        (
            mix(self.r, background.0),
            mix(self.g, background.1),
            mix(self.b, background.2),
        )
    }
}

/// Palette used by the scene.
pub mod palette {
    use super::Rgba;

    pub const PLAYER: Rgba = Rgba::rgb(0xff, 0xff, 0x00); // #ff0
    pub const OBSTACLE: Rgba = Rgba::rgb(0x96, 0x4b, 0x00); // #964B00
    pub const HEAL_ITEM: Rgba = Rgba::rgb(0xff, 0x00, 0x00); // #f00
    pub const SCORE_ITEM: Rgba = Rgba::rgb(0x00, 0xff, 0x00); // #0f0
    pub const GROUND: Rgba = Rgba::rgb(0x65, 0x43, 0x21); // #654321
    pub const HUD_TEXT: Rgba = Rgba::rgb(0xff, 0xff, 0xff); // #fff
    pub const GAME_OVER_DIM: Rgba = Rgba::rgba(0, 0, 0, 0.5);
}

/// A display that accepts immediate-mode primitives in world units.
pub trait RenderSurface {
    /// Wipe the whole surface.
    fn clear(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba);

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba);

    /// Draw text with its baseline-left corner at `(x, y)`.
    fn fill_text(&mut self, x: f64, y: f64, text: &str, font_px: u16, color: Rgba);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        color: Rgba,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        font_px: u16,
        color: Rgba,
    },
}

impl DrawCommand {
    /// Issue this command against a live surface.
    pub fn replay<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        match self {
            DrawCommand::Clear => surface.clear(),
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                color,
            } => surface.fill_rect(*x, *y, *width, *height, *color),
            DrawCommand::Circle {
                cx,
                cy,
                radius,
                color,
            } => surface.fill_circle(*cx, *cy, *radius, *color),
            DrawCommand::Text {
                x,
                y,
                text,
                font_px,
                color,
            } => surface.fill_text(*x, *y, text, *font_px, *color),
        }
    }
}

/// A surface that only records what was drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay every recorded command, in order.
    pub fn replay<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            command.replay(surface);
        }
    }

    /// Text of every recorded text command, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl RenderSurface for CommandList {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            cx,
            cy,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, x: f64, y: f64, text: &str, font_px: u16, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            font_px,
            color,
        });
    }
}
