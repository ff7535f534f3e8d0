//! Game settings
//!
//! Read from a JSON file; any field left out falls back to its default.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::platform::WEAPON_KEYS;
use crate::sim::{AsteroidPattern, BulletType, DeathPolicy, Playfield, default_bullet_types};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playfield: Playfield,
    /// RNG seed for asteroid headings
    pub seed: u64,

    // === Ship ===
    pub ship_start: Vec2,
    pub ship_speed: f32,
    pub hull_length: f32,

    // === Bullets ===
    pub max_bullets: usize,
    pub bullet_speed: f32,
    /// Selectable with keys 1, 2, 3...
    pub bullet_types: Vec<BulletType>,
    /// Bullets keep flying after a hit
    pub piercing_bullets: bool,

    // === Asteroids ===
    pub max_asteroids: usize,
    /// Spawns per second
    pub asteroid_rate: f32,
    pub asteroid_speed: f32,
    pub asteroid_pattern: AsteroidPattern,
    /// Seconds an asteroid lives; `None` means until it leaves the screen
    pub asteroid_ttl: Option<f32>,

    // === Lifecycle ===
    /// Half-extent of the asteroid/bullet hit box
    pub hit_radius: f32,
    pub death_policy: DeathPolicy,

    // === Debug ===
    /// Draw the asteroid cursor bar
    pub debug_overlay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            seed: 0x5EED,

            ship_start: Vec2::new(SHIP_START.0, SHIP_START.1),
            ship_speed: SHIP_SPEED,
            hull_length: HULL_LENGTH,

            max_bullets: MAX_BULLETS,
            bullet_speed: BULLET_SPEED,
            bullet_types: default_bullet_types(),
            piercing_bullets: false,

            max_asteroids: MAX_ASTEROIDS,
            asteroid_rate: ASTEROID_RATE,
            asteroid_speed: ASTEROID_SPEED,
            asteroid_pattern: AsteroidPattern::default(),
            asteroid_ttl: None,

            hit_radius: HIT_RADIUS,
            death_policy: DeathPolicy::default(),

            debug_overlay: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: &str| Err(SettingsError::Invalid(msg.to_string()));

        if !(self.playfield.width > 0.0 && self.playfield.height > 0.0) {
            return invalid("playfield must have a positive size");
        }
        if self.max_bullets == 0 || self.max_asteroids == 0 {
            return invalid("entity capacities must be non-zero");
        }
        if self.bullet_types.is_empty() {
            return invalid("at least one bullet type is required");
        }
        if self.bullet_types.len() > WEAPON_KEYS.len() {
            return invalid("more bullet types than weapon keys");
        }
        if self
            .bullet_types
            .iter()
            .any(|t| !(t.rate >= 0.0 && t.ttl >= 0.0))
        {
            return invalid("bullet rate and ttl must be non-negative");
        }
        if !(self.asteroid_rate > 0.0) {
            return invalid("asteroid_rate must be positive");
        }
        if !(self.hull_length > 0.0) {
            return invalid("hull_length must be positive");
        }
        if !(self.hit_radius >= 0.0) {
            return invalid("hit_radius must be non-negative");
        }
        Ok(())
    }
}
