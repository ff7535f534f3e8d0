//! Canvas that records draw calls instead of drawing

use glam::Vec2;

use super::Canvas;
use crate::Color;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line { from: Vec2, to: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Rect { origin: Vec2, size: Vec2, color: Color },
    Polyline { points: Vec<Vec2>, color: Color },
}

/// Keeps the draw calls of the current frame
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    frames: u64,
    total_calls: u64,
}

impl RecordingCanvas {
    /// Calls issued since the last `begin_frame`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Calls issued over all frames
    pub fn total_calls(&self) -> u64 {
        self.total_calls
    }

    fn push(&mut self, command: DrawCommand) {
        self.total_calls += 1;
        self.commands.push(command);
    }
}

impl Canvas for RecordingCanvas {
    fn begin_frame(&mut self) {
        self.commands.clear();
        self.frames += 1;
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.push(DrawCommand::Line { from, to, color });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.push(DrawCommand::Rect {
            origin,
            size,
            color,
        });
    }

    fn draw_polyline(&mut self, points: &[Vec2], color: Color) {
        self.push(DrawCommand::Polyline {
            points: points.to_vec(),
            color,
        });
    }
}
