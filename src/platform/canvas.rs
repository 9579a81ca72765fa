//! Paints a `DisplayList` onto the terminal with the ratatui braille canvas.

use glam::Vec2;
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as Segment, Rectangle};
use ratatui::widgets::{Block, BorderType, Borders};

use super::{DisplayList, DrawCommand, TextAnchor};
use crate::game::Aabb;

/// Arena-to-terminal scale for one painted frame. Arena y grows down, canvas
/// y grows up.
struct Scale {
    arena: Vec2,
    /// Arena units covered by one terminal cell.
    cell: Vec2,
    /// Arena units covered by one braille dot row.
    dot_height: f64,
}

impl Scale {
    fn new(area: Rect, arena: Vec2) -> Self {
        let cell = Vec2::new(
            arena.x / f32::from(area.width.max(1)),
            arena.y / f32::from(area.height.max(1)),
        );
        Self {
            arena,
            cell,
            dot_height: f64::from(cell.y) / 4.0,
        }
    }

    fn x(&self, x: f32) -> f64 {
        f64::from(x)
    }

    fn y(&self, y: f32) -> f64 {
        f64::from(self.arena.y - y)
    }
}

/// Draws the bordered game field over the whole frame and returns the inner
/// area the arena was scaled onto.
pub fn paint(frame: &mut Frame, title: &str, arena: Vec2, list: &DisplayList) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(100, 200, 255)))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(Color::Rgb(130, 220, 255)).add_modifier(Modifier::BOLD));

    let area = frame.area();
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return inner;
    }

    let scale = Scale::new(inner, arena);
    let canvas = Canvas::default()
        .background_color(list.background)
        .marker(Marker::Braille)
        .x_bounds([0.0, f64::from(arena.x)])
        .y_bounds([0.0, f64::from(arena.y)])
        .paint(|ctx| {
            for command in &list.commands {
                draw_command(ctx, command, &scale);
            }
        });
    frame.render_widget(canvas, inner);
    inner
}

fn draw_command(ctx: &mut Context, command: &DrawCommand, scale: &Scale) {
    match command {
        DrawCommand::Rect { rect, color, filled } => draw_rect(ctx, rect, *color, *filled, scale),
        DrawCommand::Polygon { points, color } => {
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                ctx.draw(&Segment {
                    x1: scale.x(a.x),
                    y1: scale.y(a.y),
                    x2: scale.x(b.x),
                    y2: scale.y(b.y),
                    color: *color,
                });
            }
        }
        DrawCommand::Circle {
            center,
            radius,
            color,
        } => ctx.draw(&Circle {
            x: scale.x(center.x),
            y: scale.y(center.y),
            radius: f64::from(*radius),
            color: *color,
        }),
        DrawCommand::Text {
            text,
            pos,
            color,
            anchor,
        } => {
            let width = text.chars().count() as f32 * scale.cell.x;
            let (x, y) = match anchor {
                TextAnchor::TopLeft => (pos.x, pos.y + scale.cell.y * 0.5),
                TextAnchor::TopRight => (pos.x - width, pos.y + scale.cell.y * 0.5),
                TextAnchor::Center => (pos.x - width / 2.0, pos.y),
            };
            ctx.print(
                scale.x(x),
                scale.y(y),
                Span::styled(
                    text.clone(),
                    Style::default().fg(*color).add_modifier(Modifier::BOLD),
                ),
            );
        }
    }
}

fn draw_rect(ctx: &mut Context, rect: &Aabb, color: Color, filled: bool, scale: &Scale) {
    let size = rect.size();
    ctx.draw(&Rectangle {
        x: scale.x(rect.min.x),
        y: scale.y(rect.max.y),
        width: f64::from(size.x),
        height: f64::from(size.y),
        color,
    });
    if !filled {
        return;
    }
    let mut y = f64::from(rect.min.y);
    while y <= f64::from(rect.max.y) {
        let cy = f64::from(scale.arena.y) - y;
        ctx.draw(&Segment {
            x1: scale.x(rect.min.x),
            y1: cy,
            x2: scale.x(rect.max.x),
            y2: cy,
            color,
        });
        y += scale.dot_height;
    }
}
