//! Per-frame simulation tick
//!
//! Order within a tick: timers, weapon switch, ship movement and aim,
//! spawns, collision pass, then the lifecycle scans which move, cull and hand
//! surviving entities to the frame sink.

use glam::Vec2;

use super::collision::{self, BulletHit, HitReport};
use super::lifecycle::ScanReport;
use super::player::{Direction, Hull};
use super::state::GameState;
use super::store::{Entity, EntityKind};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub left: bool,
    pub down: bool,
    pub right: bool,
    /// Aim target (mouse position)
    pub pointer: Option<Vec2>,
    /// Fire button held
    pub fire: bool,
    /// Bullet type picked this tick
    pub select_bullet: Option<usize>,
}

impl TickInput {
    /// Held movement directions
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(move |d| match d {
            Direction::Up => self.up,
            Direction::Left => self.left,
            Direction::Down => self.down,
            Direction::Right => self.right,
        })
    }
}

/// Receives everything that should be drawn this tick
pub trait FrameSink {
    fn entity(&mut self, kind: EntityKind, index: usize, entity: &Entity);
    fn hull(&mut self, hull: &Hull);
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub bullets_fired: usize,
    pub asteroids_spawned: usize,
    pub hits: HitReport,
    /// Asteroids destroyed by flying into the ship
    pub rammed: usize,
    pub asteroid_scan: ScanReport,
    pub bullet_scan: ScanReport,
}

/// Advance the game state by `dt` seconds
pub fn tick<S: FrameSink>(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    sink: &mut S,
) -> TickReport {
    let mut report = TickReport::default();
    let field = state.playfield;

    state.time_ticks += 1;
    state.elapsed += f64::from(dt);
    state.bullet_timer.advance(dt);
    state.asteroid_timer.advance(dt);

    // Weapon keys past the configured types do nothing
    if let Some(index) = input.select_bullet {
        if index < state.settings.bullet_types.len() {
            state.select_bullet(index);
        } else {
            log::debug!("No bullet type bound to slot {}", index);
        }
    }

    // Ship
    let ship_speed = state.settings.ship_speed;
    for direction in input.directions() {
        state.hull.translate(direction, ship_speed, dt);
    }
    state.hull.wrap(&field);
    match input.pointer {
        Some(target) => state.hull.update_aim(target),
        None => {
            let aim = state.hull.aim;
            state.hull.aim_at(aim);
        }
    }

    // Spawns
    if input.fire && state.bullet_timer.fire() {
        state.spawn_bullet();
        report.bullets_fired += 1;
    }
    if state.asteroid_timer.fire() {
        state.spawn_asteroid();
        report.asteroids_spawned += 1;
    }

    // Collisions
    let on_hit = if state.settings.piercing_bullets {
        BulletHit::Pierce
    } else {
        BulletHit::Consume
    };
    report.hits = collision::check(
        &mut state.asteroids,
        &mut state.bullets,
        state.settings.hit_radius,
        on_hit,
    );
    report.rammed = collision::check_player(&mut state.asteroids, &state.hull);
    state.kills += (report.hits.asteroids_destroyed + report.rammed) as u64;

    // Move, cull, draw
    let policy = state.settings.death_policy;
    report.asteroid_scan = state.asteroids.scan(dt, &field, policy, |index, entity| {
        sink.entity(EntityKind::Asteroid, index, entity)
    });
    report.bullet_scan = state.bullets.scan(dt, &field, policy, |index, entity| {
        sink.entity(EntityKind::Bullet, index, entity)
    });
    sink.hull(&state.hull);

    report
}
