//! Terminal realization of the render surface.
//!
//! World coordinates are scaled onto a grid of terminal cells. Draw calls
//! paint a cell buffer (same idea as the cell buffers in the play-field
//! scenes); the buffer is then stamped row-by-row as Paragraph widgets.

use crate::render::{RenderSurface, Rgba};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const BACKGROUND: (u8, u8, u8) = (0, 0, 0);

/// Fonts at or above this size render bold.
const BOLD_FONT_PX: u16 = 24;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: (u8, u8, u8),
    bg: (u8, u8, u8),
    bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: BACKGROUND,
            bg: BACKGROUND,
            bold: false,
        }
    }
}

/// Cell buffer covering a `canvas_width × canvas_height` world.
pub struct TerminalCanvas {
    cols: usize,
    rows: usize,
    canvas_width: f64,
    canvas_height: f64,
    cells: Vec<Vec<Cell>>,
}

impl TerminalCanvas {
    pub fn new(cols: u16, rows: u16, canvas_width: f64, canvas_height: f64) -> Self {
        let cols = cols as usize;
        let rows = rows as usize;
        Self {
            cols,
            rows,
            canvas_width,
            canvas_height,
            cells: vec![vec![Cell::default(); cols]; rows],
        }
    }

    /// World x to fractional column.
    fn to_col(&self, x: f64) -> f64 {
        x * self.cols as f64 / self.canvas_width
    }

    /// World y to fractional row.
    fn to_row(&self, y: f64) -> f64 {
        y * self.rows as f64 / self.canvas_height
    }

    /// Column range touched by world span `[x, x + w)`.
    fn col_span(&self, x: f64, w: f64) -> (usize, usize) {
        span(self.to_col(x), self.to_col(x + w), self.cols)
    }

    fn row_span(&self, y: f64, h: f64) -> (usize, usize) {
        span(self.to_row(y), self.to_row(y + h), self.rows)
    }

    fn paint(&mut self, row: usize, col: usize, color: Rgba) {
        let cell = &mut self.cells[row][col];
        if color.is_opaque() {
            cell.ch = ' ';
            cell.bg = (color.r, color.g, color.b);
        } else {
            cell.bg = color.over(cell.bg);
            cell.fg = color.over(cell.fg);
        }
    }

    /// Character at a cell, for tests and debugging.
    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        self.cells.get(row).and_then(|r| r.get(col)).map(|c| c.ch)
    }

    /// Background color at a cell.
    pub fn bg_at(&self, col: usize, row: usize) -> Option<(u8, u8, u8)> {
        self.cells.get(row).and_then(|r| r.get(col)).map(|c| c.bg)
    }

    /// Stamp the buffer into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        for (row_idx, row) in self.cells.iter().enumerate().take(area.height as usize) {
            let mut spans: Vec<Span> = Vec::new();
            let mut current: Option<Style> = None;
            let mut text = String::new();

            for cell in row.iter().take(area.width as usize) {
                let style = cell_style(cell);
                if current != Some(style) && !text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut text),
                        current.unwrap_or_default(),
                    ));
                }
                current = Some(style);
                text.push(cell.ch);
            }
            if !text.is_empty() {
                spans.push(Span::styled(text, current.unwrap_or_default()));
            }

            let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
            frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
        }
    }
}

fn span(start: f64, end: f64, limit: usize) -> (usize, usize) {
    let lo = start.floor().max(0.0);
    let hi = end.ceil().min(limit as f64);
    if hi <= lo {
        return (0, 0);
    }
    (lo as usize, hi as usize)
}

fn cell_style(cell: &Cell) -> Style {
    let (fr, fg, fb) = cell.fg;
    let (br, bg, bb) = cell.bg;
    let style = Style::default()
        .fg(Color::Rgb(fr, fg, fb))
        .bg(Color::Rgb(br, bg, bb));
    if cell.bold {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

impl RenderSurface for TerminalCanvas {
    fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(Cell::default());
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        let (c0, c1) = self.col_span(x, width);
        let (r0, r1) = self.row_span(y, height);
        for row in r0..r1 {
            for col in c0..c1 {
                self.paint(row, col, color);
            }
        }
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        let (c0, c1) = self.col_span(cx - radius, radius * 2.0);
        let (r0, r1) = self.row_span(cy - radius, radius * 2.0);
        let mut painted = false;

        for row in r0..r1 {
            let wy = (row as f64 + 0.5) * self.canvas_height / self.rows as f64;
            for col in c0..c1 {
                let wx = (col as f64 + 0.5) * self.canvas_width / self.cols as f64;
                let (dx, dy) = (wx - cx, wy - cy);
                if dx * dx + dy * dy <= radius * radius {
                    self.paint(row, col, color);
                    painted = true;
                }
            }
        }

        // Circles smaller than a cell still show up
        if !painted {
            let col = self.to_col(cx).floor();
            let row = self.to_row(cy).floor();
            if col >= 0.0 && row >= 0.0 && (col as usize) < self.cols && (row as usize) < self.rows
            {
                self.paint(row as usize, col as usize, color);
            }
        }
    }

    fn fill_text(&mut self, x: f64, y: f64, text: &str, font_px: u16, color: Rgba) {
        if self.rows == 0 {
            return;
        }
        // y is the baseline; glyphs sit on the row just above it
        let row = (self.to_row(y).ceil() - 1.0).clamp(0.0, (self.rows - 1) as f64) as usize;
        let start = self.to_col(x).floor().max(0.0) as usize;

        for (i, ch) in text.chars().enumerate() {
            let col = start + i;
            if col >= self.cols {
                break;
            }
            let cell = &mut self.cells[row][col];
            cell.ch = ch;
            cell.fg = color.over(cell.bg);
            cell.bold = font_px >= BOLD_FONT_PX;
        }
    }
}
