//! Platform abstraction layer
//!
//! The simulation and render adapter only see the types in this module:
//! - `Platform`: event polling, held keys, pointer, frame clock, presenting
//! - `Surface`: primitive draw calls
//! - `DisplayList`: a recorded frame that a platform paints in one go

pub mod canvas;
pub mod clock;
pub mod terminal;

use glam::Vec2;
use ratatui::style::Color;

use crate::error::Result;
use crate::game::Aabb;

pub use clock::FrameClock;
pub use terminal::TerminalPlatform;

/// Command keys. Letters are lowercased. Movement keys only show up in
/// `HeldKeys`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Space,
    Char(char),
}

/// Discrete input delivered once per frame, in arrival order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    MouseButtonDown(Vec2),
}

/// Movement keys currently held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    /// Raw 4-way direction. Down wins over up and right over left when both
    /// are held.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y = -1.0;
        }
        if self.down {
            dir.y = 1.0;
        }
        if self.left {
            dir.x = -1.0;
        }
        if self.right {
            dir.x = 1.0;
        }
        dir
    }
}

pub trait Platform {
    /// Drains everything that arrived since the previous call.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;
    fn held_keys(&self) -> HeldKeys;
    /// Pointer position in arena coordinates.
    fn pointer_position(&self) -> Vec2;
    /// Monotonic seconds since the platform was created.
    fn now(&self) -> f64;
    /// Blocks until the next frame is due and returns the elapsed seconds.
    fn tick(&mut self, target_fps: u32) -> f32;
    fn fps(&self) -> f32;
    fn present(&mut self, frame: &DisplayList) -> Result<()>;
}

/// Where a text label sits relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    TopRight,
    Center,
}

pub trait Surface {
    fn clear(&mut self, color: Color);
    fn draw_rect(&mut self, rect: Aabb, color: Color, filled: bool);
    fn draw_polygon(&mut self, points: &[Vec2], color: Color);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color, anchor: TextAnchor);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Aabb,
        color: Color,
        filled: bool,
    },
    Polygon {
        points: Vec<Vec2>,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        color: Color,
        anchor: TextAnchor,
    },
}

/// A frame's worth of draw calls, in paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayList {
    pub background: Color,
    pub commands: Vec<DrawCommand>,
}

impl Default for DisplayList {
    fn default() -> Self {
        Self {
            background: Color::Black,
            commands: Vec::new(),
        }
    }
}

#[cfg(test)]
impl DisplayList {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

impl Surface for DisplayList {
    fn clear(&mut self, color: Color) {
        self.background = color;
        self.commands.clear();
    }

    fn draw_rect(&mut self, rect: Aabb, color: Color, filled: bool) {
        self.commands.push(DrawCommand::Rect { rect, color, filled });
    }

    fn draw_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color, anchor: TextAnchor) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            color,
            anchor,
        });
    }
}
