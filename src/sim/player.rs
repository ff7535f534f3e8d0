//! Player ship kinematics
//!
//! The ship is a triangle. The nose moves freely; the two rear vertices are
//! rebuilt from the nose and the aim angle every time the aim changes.

use std::f32::consts::FRAC_PI_6;

use glam::Vec2;

use super::lifecycle::Playfield;
use crate::{cartesian_to_polar, normalize_angle, polar_to_cartesian};

/// Screen-axis movement directions (W, A, S, D)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Unit step in screen space (y grows downward)
    pub fn axis(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// The ship's triangular hull
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hull {
    pub nose: Vec2,
    pub left: Vec2,
    pub right: Vec2,
    /// Aim angle in radians, [-π, π)
    pub aim: f32,
    /// Distance from the nose to each rear vertex
    pub length: f32,
}

impl Hull {
    /// Upright ship with the nose at `nose`, rear vertices below it
    pub fn new(nose: Vec2, length: f32) -> Self {
        let half_width = 0.5 * length;
        let depth = (3.0f32).sqrt() / 2.0 * length;
        Self {
            nose,
            left: nose + Vec2::new(-half_width, depth),
            right: nose + Vec2::new(half_width, depth),
            aim: -std::f32::consts::FRAC_PI_2,
            length,
        }
    }

    /// Translate all three vertices along a screen axis.
    ///
    /// Movement ignores the aim angle.
    pub fn translate(&mut self, direction: Direction, speed: f32, dt: f32) {
        let delta = direction.axis() * speed * dt;
        self.nose += delta;
        self.left += delta;
        self.right += delta;
    }

    /// Point the ship at `target`
    pub fn update_aim(&mut self, target: Vec2) {
        let (_, theta) = cartesian_to_polar(target - self.nose);
        self.aim_at(theta);
    }

    /// Set the aim angle and rebuild the rear vertices
    pub fn aim_at(&mut self, theta: f32) {
        self.aim = normalize_angle(theta);
        self.left = self.nose - polar_to_cartesian(self.length, self.aim - FRAC_PI_6);
        self.right = self.nose - polar_to_cartesian(self.length, self.aim + FRAC_PI_6);
    }

    /// Unit vector the ship is facing
    pub fn facing(&self) -> Vec2 {
        polar_to_cartesian(1.0, self.aim)
    }

    /// Teleport the nose to the opposite edge if it left the playfield.
    ///
    /// Rear vertices follow on the next `aim_at`.
    pub fn wrap(&mut self, field: &Playfield) {
        self.nose = field.wrap(self.nose);
    }

    pub fn vertices(&self) -> [Vec2; 3] {
        [self.nose, self.left, self.right]
    }
}
