//! Rendering seam
//!
//! The game issues immediate-mode draw calls through `Canvas`; it keeps no
//! buffers of its own. `SceneRenderer` turns simulation output into calls.

pub mod recording;
pub mod shapes;

pub use recording::{DrawCommand, RecordingCanvas};

use glam::Vec2;

use crate::Color;
use crate::sim::{Entity, EntityKind, FrameSink, GameState, Hull};

/// Immediate-mode drawing primitives supplied by the graphics backend
pub trait Canvas {
    /// Start a new frame
    fn begin_frame(&mut self) {}
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
    fn draw_polyline(&mut self, points: &[Vec2], color: Color);
}

/// Radius of the markers on the hull's rear vertices
const VERTEX_MARKER_RADIUS: f32 = 4.0;

/// Draws entities and the ship as the tick reports them
pub struct SceneRenderer<'a, C: Canvas> {
    canvas: &'a mut C,
}

impl<'a, C: Canvas> SceneRenderer<'a, C> {
    pub fn new(canvas: &'a mut C) -> Self {
        Self { canvas }
    }

    /// Asteroid store occupancy bar with the add cursor marked
    pub fn overlay(&mut self, state: &GameState) {
        let range = state.asteroids.range();
        let (outline, marker) = shapes::cursor_bar(&state.playfield, &range);
        self.canvas.draw_polyline(&outline, Color::RED);
        self.canvas.draw_line(marker[0], marker[1], Color::YELLOW);
    }
}

impl<C: Canvas> FrameSink for SceneRenderer<'_, C> {
    fn entity(&mut self, kind: EntityKind, _index: usize, entity: &Entity) {
        match kind {
            EntityKind::Asteroid => {
                self.canvas.fill_rect(entity.pos, Vec2::ONE, Color::BLUE);
                self.canvas
                    .draw_polyline(&shapes::asteroid_outline(entity.pos), entity.color);
            }
            EntityKind::Bullet => {
                let (origin, size) = shapes::bullet_rect(entity.pos);
                self.canvas.fill_rect(origin, size, entity.color);
            }
        }
    }

    fn hull(&mut self, hull: &Hull) {
        self.canvas.draw_circle(hull.left, VERTEX_MARKER_RADIUS, Color::GREEN);
        self.canvas.draw_circle(hull.right, VERTEX_MARKER_RADIUS, Color::BLUE);
        self.canvas
            .draw_polyline(&shapes::hull_outline(hull), Color::RAYWHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::SpawnParams;

    #[test]
    fn test_asteroid_draw_calls() {
        let mut canvas = RecordingCanvas::default();
        let mut store = crate::sim::EntityStore::new(EntityKind::Asteroid, 2).unwrap();
        let handle = store.spawn(SpawnParams {
            pos: Vec2::new(50.0, 60.0),
            dir: Vec2::ZERO,
            speed: 0.0,
            color: Color::RED,
            tag: 0,
            ttl: None,
        });
        let entity = *store.get(handle).unwrap();

        SceneRenderer::new(&mut canvas).entity(EntityKind::Asteroid, 0, &entity);
        assert_eq!(canvas.commands().len(), 2);
        match &canvas.commands()[1] {
            DrawCommand::Polyline { points, color } => {
                assert_eq!(points.len(), shapes::HEXAGON_SIDES + 1);
                assert_eq!(*color, Color::RED);
            }
            other => panic!("expected outline, got {:?}", other),
        }
    }

    #[test]
    fn test_hull_draw_calls() {
        let mut canvas = RecordingCanvas::default();
        let hull = Hull::new(Vec2::new(10.0, 10.0), 40.0);
        SceneRenderer::new(&mut canvas).hull(&hull);
        assert_eq!(canvas.count(|c| matches!(c, DrawCommand::Circle { .. })), 2);
        assert_eq!(canvas.count(|c| matches!(c, DrawCommand::Polyline { .. })), 1);
    }

    #[test]
    fn test_overlay() {
        let state = GameState::new(&Settings {
            max_asteroids: 4,
            max_bullets: 4,
            ..Settings::default()
        })
        .unwrap();
        let mut canvas = RecordingCanvas::default();
        SceneRenderer::new(&mut canvas).overlay(&state);
        assert_eq!(canvas.count(|c| matches!(c, DrawCommand::Line { .. })), 1);
        assert_eq!(canvas.count(|c| matches!(c, DrawCommand::Polyline { .. })), 1);
    }
}
