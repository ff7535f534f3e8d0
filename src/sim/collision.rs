//! Collision detection between entity collections
//!
//! Deliberately coarse: asteroid vs bullet is a square box test around the
//! bullet, asteroid vs ship is a point-in-triangle test on the hull.

use glam::Vec2;

use super::player::Hull;
use super::store::EntityStore;

/// What happens to a bullet that hits an asteroid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletHit {
    /// Bullet is spent on the first asteroid it hits
    #[default]
    Consume,
    /// Bullet keeps flying and can hit more asteroids
    Pierce,
}

/// Hits found by one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitReport {
    pub asteroids_destroyed: usize,
    pub bullets_spent: usize,
}

/// Axis-aligned proximity: both axis distances within `radius`
#[inline]
pub fn within_box(a: Vec2, b: Vec2, radius: f32) -> bool {
    (a.x - b.x).abs() <= radius && (a.y - b.y).abs() <= radius
}

/// Barycentric point-in-triangle test (edges count as inside)
pub fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if denom.abs() < f32::EPSILON {
        // Degenerate hull
        return false;
    }
    let alpha = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / denom;
    let beta = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / denom;
    let gamma = 1.0 - alpha - beta;
    alpha >= 0.0 && beta >= 0.0 && gamma >= 0.0
}

/// Every live asteroid against every live bullet
pub fn check(
    asteroids: &mut EntityStore,
    bullets: &mut EntityStore,
    radius: f32,
    on_hit: BulletHit,
) -> HitReport {
    let mut report = HitReport::default();
    if asteroids.is_empty() || bullets.is_empty() {
        return report;
    }

    let (asteroid_range, asteroid_slots) = asteroids.parts_mut();
    let (bullet_range, bullet_slots) = bullets.parts_mut();

    for i in asteroid_range.indices() {
        let asteroid = &mut asteroid_slots[i];
        if !asteroid.is_alive() {
            continue;
        }
        for j in bullet_range.indices() {
            let bullet = &mut bullet_slots[j];
            if !bullet.is_alive() || !within_box(asteroid.pos, bullet.pos, radius) {
                continue;
            }

            asteroid.kill();
            report.asteroids_destroyed += 1;
            if on_hit == BulletHit::Consume {
                bullet.kill();
                report.bullets_spent += 1;
            }
            log::trace!("Bullet slot {} destroyed asteroid slot {}", j, i);
            break;
        }
    }

    report
}

/// Every live asteroid against the ship hull. Returns asteroids destroyed.
///
/// The ship itself takes no damage.
pub fn check_player(asteroids: &mut EntityStore, hull: &Hull) -> usize {
    let (range, slots) = asteroids.parts_mut();
    let mut destroyed = 0;
    for i in range.indices() {
        let asteroid = &mut slots[i];
        if asteroid.is_alive()
            && point_in_triangle(asteroid.pos, hull.nose, hull.left, hull.right)
        {
            asteroid.kill();
            destroyed += 1;
        }
    }
    destroyed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use crate::consts::HIT_RADIUS;
    use crate::sim::store::{EntityKind, SpawnParams};

    fn at(x: f32, y: f32) -> SpawnParams {
        SpawnParams {
            pos: Vec2::new(x, y),
            dir: Vec2::ZERO,
            speed: 0.0,
            color: Color::RED,
            tag: 0,
            ttl: None,
        }
    }

    fn stores() -> (EntityStore, EntityStore) {
        (
            EntityStore::new(EntityKind::Asteroid, 8).unwrap(),
            EntityStore::new(EntityKind::Bullet, 8).unwrap(),
        )
    }

    #[test]
    fn test_within_box() {
        assert!(within_box(Vec2::new(100.0, 100.0), Vec2::new(150.0, 150.0), 50.0));
        assert!(!within_box(Vec2::new(100.0, 100.0), Vec2::new(150.1, 100.0), 50.0));
        assert!(!within_box(Vec2::new(100.0, 100.0), Vec2::new(100.0, 40.0), 50.0));
    }

    #[test]
    fn test_bullet_in_range_destroys_asteroid() {
        let (mut asteroids, mut bullets) = stores();
        let asteroid = asteroids.spawn(at(100.0, 100.0));
        bullets.spawn(at(120.0, 100.0));

        let report = check(&mut asteroids, &mut bullets, HIT_RADIUS, BulletHit::Consume);
        assert_eq!(report.asteroids_destroyed, 1);
        assert!(asteroids.get(asteroid).is_none());
    }

    #[test]
    fn test_bullet_out_of_range_misses() {
        let (mut asteroids, mut bullets) = stores();
        let asteroid = asteroids.spawn(at(100.0, 100.0));
        bullets.spawn(at(200.0, 100.0));

        let report = check(&mut asteroids, &mut bullets, HIT_RADIUS, BulletHit::Consume);
        assert_eq!(report, HitReport::default());
        assert!(asteroids.get(asteroid).is_some());
    }

    #[test]
    fn test_hit_bullet_dies_by_default() {
        // Bullets are spent on impact unless piercing is configured
        let (mut asteroids, mut bullets) = stores();
        asteroids.spawn(at(100.0, 100.0));
        asteroids.spawn(at(110.0, 100.0));
        let bullet = bullets.spawn(at(105.0, 100.0));

        let report = check(&mut asteroids, &mut bullets, HIT_RADIUS, BulletHit::default());
        assert_eq!(report.asteroids_destroyed, 1);
        assert_eq!(report.bullets_spent, 1);
        assert!(bullets.get(bullet).is_none());
        assert_eq!(asteroids.alive_count(), 1);
    }

    #[test]
    fn test_piercing_bullet_survives() {
        let (mut asteroids, mut bullets) = stores();
        asteroids.spawn(at(100.0, 100.0));
        asteroids.spawn(at(110.0, 100.0));
        let bullet = bullets.spawn(at(105.0, 100.0));

        let report = check(&mut asteroids, &mut bullets, HIT_RADIUS, BulletHit::Pierce);
        assert_eq!(report.asteroids_destroyed, 2);
        assert_eq!(report.bullets_spent, 0);
        assert!(bullets.get(bullet).is_some());
    }

    #[test]
    fn test_dead_entities_ignored() {
        let (mut asteroids, mut bullets) = stores();
        asteroids.spawn(at(100.0, 100.0));
        let bullet = bullets.spawn(at(100.0, 100.0));
        bullets.kill(bullet);

        let report = check(&mut asteroids, &mut bullets, HIT_RADIUS, BulletHit::Consume);
        assert_eq!(report.asteroids_destroyed, 0);
    }

    #[test]
    fn test_point_in_triangle() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let c = Vec2::new(0.0, 10.0);
        assert!(point_in_triangle(Vec2::new(2.0, 2.0), a, b, c));
        assert!(point_in_triangle(Vec2::new(0.0, 0.0), a, b, c));
        assert!(!point_in_triangle(Vec2::new(8.0, 8.0), a, b, c));
        assert!(!point_in_triangle(Vec2::new(-1.0, 2.0), a, b, c));
        // Winding does not matter
        assert!(point_in_triangle(Vec2::new(2.0, 2.0), a, c, b));
    }

    #[test]
    fn test_player_hull_destroys_asteroid() {
        let mut asteroids = EntityStore::new(EntityKind::Asteroid, 4).unwrap();
        let mut hull = Hull::new(Vec2::new(300.0, 300.0), 40.0);
        hull.aim_at(0.0);

        // Just behind the nose, inside the triangle
        let inside = asteroids.spawn(at(285.0, 300.0));
        let outside = asteroids.spawn(at(500.0, 500.0));

        assert_eq!(check_player(&mut asteroids, &hull), 1);
        assert!(asteroids.get(inside).is_none());
        assert!(asteroids.get(outside).is_some());
    }
}
