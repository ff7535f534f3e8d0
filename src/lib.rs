//! Asteroid Arena - an arena-backed Asteroids simulation
//!
//! Core modules:
//! - `sim`: Simulation (bump arena, entity slots, lifecycle cursors, collisions, ship)
//! - `renderer`: Draw-call seam and shape generation
//! - `platform`: Input/timing/window collaborators
//! - `settings`: JSON configuration
//! - `driver`: Frame loop over the collaborators

pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 1920.0;
    pub const SCREEN_HEIGHT: f32 = 1080.0;

    /// Ship defaults
    pub const SHIP_SPEED: f32 = 350.0;
    pub const HULL_LENGTH: f32 = 40.0;
    pub const SHIP_START: (f32, f32) = (300.0, 300.0);

    /// Bullet defaults
    pub const MAX_BULLETS: usize = 6000;
    pub const BULLET_SPEED: f32 = 700.0;
    pub const BULLET_SIZE: f32 = 4.0;

    /// Asteroid defaults
    pub const MAX_ASTEROIDS: usize = 600;
    pub const ASTEROID_SPEED: f32 = 700.0;
    /// Spawns per second
    pub const ASTEROID_RATE: f32 = 100.0;
    /// Outline radius of the hexagon
    pub const ASTEROID_RADIUS: f32 = 30.0;

    /// Half-extent of the axis-aligned asteroid/bullet hit box
    pub const HIT_RADIUS: f32 = 50.0;

    /// Longest frame the driver will simulate in one step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// RGBA color, laid out so it can live inside arena records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RAYWHITE: Color = Color::rgb(245, 245, 245);
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const PINK: Color = Color::rgb(255, 109, 194);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    pub const YELLOW: Color = Color::rgb(253, 249, 0);
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
