//! Game state and spawn bookkeeping
//!
//! Everything the tick mutates lives here: the ship, the two entity stores,
//! spawn timers and the seeded RNG used for asteroid headings.

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::ArenaError;
use super::lifecycle::Playfield;
use super::player::Hull;
use super::store::{EntityHandle, EntityKind, EntityStore, SpawnParams};
use crate::Color;
use crate::consts::BULLET_SIZE;
use crate::settings::Settings;

/// Accumulates elapsed time and allows a spawn once it passes the threshold
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpawnTimer {
    pub ticker: f32,
    pub threshold: f32,
}

impl SpawnTimer {
    pub fn new(threshold: f32) -> Self {
        Self {
            ticker: 0.0,
            threshold,
        }
    }

    /// Timer for a rate given in spawns per second
    pub fn per_second(rate: f32) -> Self {
        Self::new(1.0 / rate)
    }

    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.ticker += dt;
    }

    #[inline]
    pub fn ready(&self) -> bool {
        self.ticker > self.threshold
    }

    /// Consume the spawn if ready, resetting the ticker
    pub fn fire(&mut self) -> bool {
        if self.ready() {
            self.ticker = 0.0;
            true
        } else {
            false
        }
    }
}

/// A selectable weapon: fire interval, bullet lifetime and color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletType {
    /// Seconds a bullet lives
    pub ttl: f32,
    /// Minimum seconds between shots
    pub rate: f32,
    pub color: Color,
}

pub fn default_bullet_types() -> Vec<BulletType> {
    vec![
        BulletType {
            ttl: 2.0,
            rate: 0.1,
            color: Color::PINK,
        },
        BulletType {
            ttl: 3.0,
            rate: 0.3,
            color: Color::GREEN,
        },
        BulletType {
            ttl: 4.0,
            rate: 0.4,
            color: Color::BLUE,
        },
    ]
}

/// Where new asteroids come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AsteroidPattern {
    /// Single stream from the top-left corner toward the bottom-right
    Diagonal,
    /// Rotate through the four corners with random headings into the field
    #[default]
    Corners,
}

/// Complete simulation state
#[derive(Debug)]
pub struct GameState {
    pub settings: Settings,
    pub playfield: Playfield,
    pub hull: Hull,
    pub asteroids: EntityStore,
    pub bullets: EntityStore,
    /// Index into `settings.bullet_types`
    pub selected_bullet: usize,
    pub bullet_timer: SpawnTimer,
    pub asteroid_timer: SpawnTimer,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds simulated
    pub elapsed: f64,
    /// Asteroids destroyed by bullets or the hull
    pub kills: u64,
}

impl GameState {
    /// Build the state and reserve both entity arenas.
    ///
    /// Failing to reserve the arenas is not recoverable; callers are expected
    /// to report the error and exit.
    pub fn new(settings: &Settings) -> Result<Self, ArenaError> {
        let asteroids = EntityStore::new(EntityKind::Asteroid, settings.max_asteroids)?;
        let bullets = EntityStore::new(EntityKind::Bullet, settings.max_bullets)?;

        let mut hull = Hull::new(settings.ship_start, settings.hull_length);
        hull.aim_at(hull.aim);

        let first_rate = settings.bullet_types.first().map_or(0.0, |t| t.rate);

        log::info!(
            "Game state: {}x{} field, seed {}",
            settings.playfield.width,
            settings.playfield.height,
            settings.seed
        );

        Ok(Self {
            settings: settings.clone(),
            playfield: settings.playfield,
            hull,
            asteroids,
            bullets,
            selected_bullet: 0,
            bullet_timer: SpawnTimer::new(first_rate),
            asteroid_timer: SpawnTimer::per_second(settings.asteroid_rate),
            rng: Pcg32::seed_from_u64(settings.seed),
            time_ticks: 0,
            elapsed: 0.0,
            kills: 0,
        })
    }

    pub fn bullet_type(&self) -> &BulletType {
        &self.settings.bullet_types[self.selected_bullet]
    }

    /// Switch weapons. An index past the configured types is a caller bug.
    pub fn select_bullet(&mut self, index: usize) {
        let count = self.settings.bullet_types.len();
        assert!(
            index < count,
            "bullet type {index} out of range ({count} types configured)"
        );
        if index != self.selected_bullet {
            log::debug!("Bullet type {} selected", index);
        }
        self.selected_bullet = index;
        self.bullet_timer.threshold = self.settings.bullet_types[index].rate;
    }

    /// Fire one bullet from the nose along the aim
    pub fn spawn_bullet(&mut self) -> EntityHandle {
        let kind = *self.bullet_type();
        let params = SpawnParams {
            pos: self.hull.nose - Vec2::splat(BULLET_SIZE / 2.0),
            dir: self.hull.facing(),
            speed: self.settings.bullet_speed,
            color: kind.color,
            tag: self.selected_bullet as u32,
            ttl: Some(kind.ttl),
        };
        self.bullets.spawn(params)
    }

    /// Launch one asteroid according to the configured pattern
    pub fn spawn_asteroid(&mut self) -> EntityHandle {
        let serial = self.asteroids.spawned();
        let (pos, dir, color) = match self.settings.asteroid_pattern {
            AsteroidPattern::Diagonal => (
                Vec2::ZERO,
                Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2),
                Color::RED,
            ),
            AsteroidPattern::Corners => {
                let vx = self.rng.random_range(0..750) as f32 / 1000.0;
                let vy = self.rng.random_range(0..500) as f32 / 1000.0;
                // Far edges sit just inside the half-open playfield
                let far = self.playfield.size() - Vec2::ONE;
                match serial % 4 {
                    0 => (Vec2::ZERO, Vec2::new(vx, vy), Color::RED),
                    1 => (far, Vec2::new(-vx, -vy), Color::PINK),
                    2 => (Vec2::new(far.x, 0.0), Vec2::new(-vx, vy), Color::GREEN),
                    _ => (Vec2::new(0.0, far.y), Vec2::new(vx, -vy), Color::YELLOW),
                }
            }
        };

        self.asteroids.spawn(SpawnParams {
            pos,
            dir,
            speed: self.settings.asteroid_speed,
            color,
            tag: serial as u32,
            ttl: self.settings.asteroid_ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_settings() -> Settings {
        Settings {
            max_asteroids: 8,
            max_bullets: 8,
            ..Settings::default()
        }
    }

    #[test]
    fn test_spawn_timer() {
        let mut timer = SpawnTimer::new(0.3);
        timer.advance(0.2);
        assert!(!timer.fire());
        timer.advance(0.2);
        assert!(timer.fire());
        assert_eq!(timer.ticker, 0.0);
        assert!(!timer.fire());
    }

    #[test]
    fn test_spawn_timer_threshold_is_strict() {
        let mut timer = SpawnTimer::new(0.5);
        timer.advance(0.5);
        assert!(!timer.ready());
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(&small_settings()).unwrap();
        assert_eq!(state.asteroids.capacity(), 8);
        assert_eq!(state.bullets.capacity(), 8);
        assert_eq!(state.selected_bullet, 0);
        assert!((state.bullet_timer.threshold - 0.1).abs() < 1e-6);
        assert!((state.asteroid_timer.threshold - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_select_bullet_changes_rate() {
        let mut state = GameState::new(&small_settings()).unwrap();
        state.select_bullet(2);
        assert_eq!(state.bullet_type().color, Color::BLUE);
        assert!((state.bullet_timer.threshold - 0.4).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_select_bullet_out_of_range_panics() {
        let mut state = GameState::new(&small_settings()).unwrap();
        state.select_bullet(3);
    }

    #[test]
    fn test_bullet_leaves_nose_along_aim() {
        let mut state = GameState::new(&small_settings()).unwrap();
        state.hull.aim_at(0.0);
        let handle = state.spawn_bullet();
        let bullet = state.bullets.get(handle).unwrap();
        assert_eq!(bullet.pos, state.hull.nose - Vec2::splat(2.0));
        assert!((bullet.dir - Vec2::X).length() < 1e-5);
        assert_eq!(bullet.ttl(), Some(2.0));
        assert_eq!(bullet.color, Color::PINK);
    }

    #[test]
    fn test_corner_pattern_cycles_and_heads_inward() {
        let mut state = GameState::new(&small_settings()).unwrap();
        let field = state.playfield;
        for _ in 0..4 {
            let handle = state.spawn_asteroid();
            let asteroid = *state.asteroids.get(handle).unwrap();
            assert!(field.contains(asteroid.pos));
            // One second of travel at unit speed stays on screen
            assert!(field.contains(asteroid.pos + asteroid.dir));
        }
        let colors: Vec<_> = state.asteroids.live().map(|(_, e)| e.color).collect();
        assert_eq!(colors, vec![Color::RED, Color::PINK, Color::GREEN, Color::YELLOW]);
    }

    #[test]
    fn test_diagonal_pattern() {
        let mut state = GameState::new(&Settings {
            asteroid_pattern: AsteroidPattern::Diagonal,
            ..small_settings()
        })
        .unwrap();
        let handle = state.spawn_asteroid();
        let asteroid = state.asteroids.get(handle).unwrap();
        assert_eq!(asteroid.pos, Vec2::ZERO);
        assert!((asteroid.dir.length() - 1.0).abs() < 1e-5);
        assert_eq!(asteroid.speed, 700.0);
    }

    #[test]
    fn test_same_seed_same_asteroids() {
        let mut a = GameState::new(&small_settings()).unwrap();
        let mut b = GameState::new(&small_settings()).unwrap();
        for _ in 0..6 {
            a.spawn_asteroid();
            b.spawn_asteroid();
        }
        assert_eq!(a.asteroids.slots(), b.asteroids.slots());
    }
}
