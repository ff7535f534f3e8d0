//! Shape generation for 2D primitives

use std::f32::consts::TAU;
use std::sync::LazyLock;

use glam::Vec2;

use crate::consts::{ASTEROID_RADIUS, BULLET_SIZE};
use crate::sim::{Hull, LiveRange, Playfield};

/// Corners on an asteroid outline
pub const HEXAGON_SIDES: usize = 6;

/// Hexagon corner offsets, built once on first use
static HEXAGON: LazyLock<[Vec2; HEXAGON_SIDES]> = LazyLock::new(|| {
    let step = TAU / HEXAGON_SIDES as f32;
    std::array::from_fn(|i| {
        let angle = step * i as f32;
        Vec2::new(angle.sin(), angle.cos()) * ASTEROID_RADIUS
    })
});

/// Offsets of the hexagon corners from the asteroid center
pub fn hexagon_offsets() -> &'static [Vec2; HEXAGON_SIDES] {
    &HEXAGON
}

/// Closed asteroid outline (first corner repeated at the end)
pub fn asteroid_outline(center: Vec2) -> [Vec2; HEXAGON_SIDES + 1] {
    let offsets = hexagon_offsets();
    std::array::from_fn(|i| center + offsets[i % HEXAGON_SIDES])
}

/// Square bullet sprite: (top-left, size)
pub fn bullet_rect(pos: Vec2) -> (Vec2, Vec2) {
    (pos, Vec2::splat(BULLET_SIZE))
}

/// Closed hull triangle
pub fn hull_outline(hull: &Hull) -> [Vec2; 4] {
    [hull.nose, hull.left, hull.right, hull.nose]
}

/// Debug bar showing the cursor position inside a store, one unit per slot.
///
/// Returns the closed outline of the bar and the marker line at `add`.
pub fn cursor_bar(field: &Playfield, range: &LiveRange) -> ([Vec2; 5], [Vec2; 2]) {
    const BAR_HEIGHT: f32 = 50.0;
    const SLOT_WIDTH: f32 = 1.0;

    let origin = Vec2::new(field.width * 0.25, field.height * 0.75);
    let width = range.capacity() as f32 * SLOT_WIDTH;
    let outline = [
        origin,
        origin + Vec2::new(width, 0.0),
        origin + Vec2::new(width, BAR_HEIGHT),
        origin + Vec2::new(0.0, BAR_HEIGHT),
        origin,
    ];

    let x = origin.x + range.add() as f32 * SLOT_WIDTH;
    let marker = [Vec2::new(x, origin.y), Vec2::new(x, origin.y + BAR_HEIGHT)];
    (outline, marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hexagon_table() {
        let offsets = hexagon_offsets();
        for offset in offsets {
            assert!((offset.length() - ASTEROID_RADIUS).abs() < 1e-4);
        }
        // First corner straight down in screen space
        assert!((offsets[0] - Vec2::new(0.0, ASTEROID_RADIUS)).length() < 1e-4);
        // Same table on every call
        assert!(std::ptr::eq(offsets, hexagon_offsets()));
    }

    #[test]
    fn test_asteroid_outline_is_closed() {
        let outline = asteroid_outline(Vec2::new(100.0, 50.0));
        assert_eq!(outline[0], outline[HEXAGON_SIDES]);
        assert_eq!(outline[0], Vec2::new(100.0, 50.0) + hexagon_offsets()[0]);
    }

    #[test]
    fn test_cursor_bar_marker() {
        let field = Playfield::new(400.0, 400.0);
        let mut range = LiveRange::new(600);
        for _ in 0..3 {
            range.claim();
        }
        let (outline, marker) = cursor_bar(&field, &range);
        assert_eq!(outline[0], outline[4]);
        assert_eq!(outline[0], Vec2::new(100.0, 300.0));
        // As wide as the store, marker three slots in
        assert!((outline[1].x - 700.0).abs() < 1e-4);
        assert!((marker[0].x - 103.0).abs() < 1e-4);
        assert_eq!(marker[0].x, marker[1].x);
    }
}
