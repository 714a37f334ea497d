//! Game screen: bordered play field, status bar and a rules panel.
//!
//! ```text
//! ┌─ Side Scroller ───────────────────┬─ Info ──────┐
//! │                                   │ Rules       │
//! │   [play field]                    │ Score       │
//! │                                   │ ...         │
//! │ [status - 2 lines]                │             │
//! └───────────────────────────────────┴─────────────┘
//! ```

use super::canvas::TerminalCanvas;
use crate::core::config::{CollisionPolicy, JumpPolicy, SpawnPolicy};
use crate::game::{StepOutcome, World};
use crate::render::{palette, Rgba};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TITLE: &str = " Side Scroller ";
const BORDER_COLOR: Color = Color::LightYellow;
const INFO_PANEL_WIDTH: u16 = 22;
const MIN_FIELD_HEIGHT: u16 = 10;

/// Areas of the game screen.
pub struct SceneLayout {
    pub field: Rect,
    pub status_bar: Rect,
    pub info_panel: Rect,
}

/// Split `area` into play field, 2-line status bar and info panel, drawing
/// the outer border.
pub fn scene_layout(frame: &mut Frame, area: Rect) -> SceneLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(TITLE)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER_COLOR));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(INFO_PANEL_WIDTH)])
        .split(inner);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(MIN_FIELD_HEIGHT), Constraint::Length(2)])
        .split(columns[0]);

    SceneLayout {
        field: left[0],
        status_bar: left[1],
        info_panel: columns[1],
    }
}

/// Draw one frame of the game screen from the latest step.
pub fn render_game_scene(frame: &mut Frame, area: Rect, world: &World, outcome: &StepOutcome) {
    let layout = scene_layout(frame, area);

    let mut canvas = TerminalCanvas::new(
        layout.field.width,
        layout.field.height,
        world.config.canvas_width,
        world.config.canvas_height,
    );
    outcome.commands.replay(&mut canvas);
    canvas.render(frame, layout.field);

    render_status(frame, layout.status_bar, outcome.game_over);
    render_info_panel(frame, layout.info_panel, world);
}

fn render_status(frame: &mut Frame, area: Rect, game_over: bool) {
    if game_over {
        render_status_bar(
            frame,
            area,
            "Game Over",
            Color::LightRed,
            &[("[R]", "Restart"), ("[Esc]", "Quit")],
        );
    } else {
        render_status_bar(
            frame,
            area,
            "Fly!",
            Color::LightYellow,
            &[("[Space/Up]", "Jump"), ("[Esc]", "Quit")],
        );
    }
}

/// Status message on line 1, `[key] action` hints on line 2.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height == 0 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height < 2 || controls.is_empty() {
        return;
    }

    let mut spans = Vec::new();
    for (i, (key, action)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, world: &World) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = info_lines(world);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Legend:",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(legend_line(palette::PLAYER, "Player"));
    lines.push(legend_line(palette::OBSTACLE, "Obstacle"));
    lines.push(legend_line(palette::SCORE_ITEM, "Score +1"));
    if world.config.rules.collision == CollisionPolicy::Health {
        lines.push(legend_line(palette::HEAL_ITEM, "Health +1"));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn info_lines(world: &World) -> Vec<Line<'static>> {
    let rules = &world.config.rules;
    let spawn = match rules.spawn {
        SpawnPolicy::Timed { .. } => "timed",
        SpawnPolicy::Chance { .. } => "random",
    };
    let collision = match rules.collision {
        CollisionPolicy::Health => "health",
        CollisionPolicy::SingleHit => "one hit",
    };
    let jump = match rules.jump {
        JumpPolicy::MultiFlap => "flap",
        JumpPolicy::SingleFlap => "single",
    };

    vec![
        field_line("Rules: ", rules.name().to_string()),
        field_line("Spawn: ", spawn.to_string()),
        field_line("Hits:  ", collision.to_string()),
        field_line("Jump:  ", jump.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                world.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        field_line("Taken: ", world.hits_taken.to_string()),
    ]
}

fn field_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::LightYellow)),
    ])
}

fn legend_line(color: Rgba, label: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            " \u{2588} ",
            Style::default().fg(Color::Rgb(color.r, color.g, color.b)),
        ),
        Span::styled(label, Style::default().fg(Color::DarkGray)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{GameConfig, RuleSet};

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_info_lines_name_classic_rules() {
        let world = World::new(GameConfig::default()).unwrap();
        let lines: Vec<String> = info_lines(&world).iter().map(text_of).collect();
        assert_eq!(lines[0], "Rules: classic");
        assert_eq!(lines[1], "Spawn: timed");
        assert_eq!(lines[2], "Hits:  health");
    }

    #[test]
    fn test_info_lines_name_arcade_rules() {
        let world = World::new(GameConfig::with_rules(RuleSet::arcade())).unwrap();
        let lines: Vec<String> = info_lines(&world).iter().map(text_of).collect();
        assert_eq!(lines[0], "Rules: arcade");
        assert_eq!(lines[3], "Jump:  single");
    }

    #[test]
    fn test_info_lines_show_score_and_hits() {
        let mut world = World::new(GameConfig::default()).unwrap();
        world.score = 7;
        world.hits_taken = 2;
        let lines: Vec<String> = info_lines(&world).iter().map(text_of).collect();
        assert!(lines.contains(&"Score: 7".to_string()));
        assert!(lines.contains(&"Taken: 2".to_string()));
    }
}
