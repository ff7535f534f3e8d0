//! Frame loop
//!
//! One iteration is one frame: poll input, read the clock, tick the
//! simulation straight into the canvas, present. Runs until the window asks
//! to close.

use crate::consts::MAX_FRAME_DT;
use crate::platform::{FrameClock, Input, Window, read_tick_input};
use crate::renderer::{Canvas, SceneRenderer};
use crate::sim::{GameState, TickReport, tick};

/// Totals over a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub bullets_fired: u64,
    pub asteroids_spawned: u64,
    pub asteroids_destroyed: u64,
    pub entities_reaped: u64,
    /// Entities drawn in the last frame
    pub last_frame_entities: usize,
}

impl RunSummary {
    fn record(&mut self, report: &TickReport) {
        self.frames += 1;
        self.bullets_fired += report.bullets_fired as u64;
        self.asteroids_spawned += report.asteroids_spawned as u64;
        self.asteroids_destroyed += (report.hits.asteroids_destroyed + report.rammed) as u64;
        self.entities_reaped += (report.asteroid_scan.reaped + report.bullet_scan.reaped) as u64;
        self.last_frame_entities = report.asteroid_scan.rendered + report.bullet_scan.rendered;
    }
}

/// Run frames until `window` asks to close
pub fn run<I, K, W, C>(
    state: &mut GameState,
    input: &mut I,
    clock: &mut K,
    window: &mut W,
    canvas: &mut C,
) -> RunSummary
where
    I: Input,
    K: FrameClock,
    W: Window,
    C: Canvas,
{
    let mut summary = RunSummary::default();
    let overlay = state.settings.debug_overlay;

    while !window.should_close() {
        input.poll();
        let dt = clock.elapsed_since_last_tick().clamp(0.0, MAX_FRAME_DT);
        let commands = read_tick_input(&*input);

        canvas.begin_frame();
        let mut scene = SceneRenderer::new(&mut *canvas);
        let report = tick(state, &commands, dt, &mut scene);
        if overlay {
            scene.overlay(state);
        }
        window.end_frame();

        summary.record(&report);
    }

    log::debug!(
        "Run finished after {} frames: {} fired, {} spawned, {} destroyed",
        summary.frames,
        summary.bullets_fired,
        summary.asteroids_spawned,
        summary.asteroids_destroyed
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::platform::headless::{FixedClock, FrameBudget, InputFrame, ScriptedInput};
    use crate::renderer::{DrawCommand, RecordingCanvas};
    use glam::Vec2;

    fn state(settings: Settings) -> GameState {
        GameState::new(&Settings {
            max_asteroids: 64,
            max_bullets: 64,
            ..settings
        })
        .unwrap()
    }

    #[test]
    fn test_runs_until_window_closes() {
        let mut state = state(Settings::default());
        let mut input = ScriptedInput::default();
        let mut window = FrameBudget::new(30);
        let mut canvas = RecordingCanvas::default();

        let summary = run(
            &mut state,
            &mut input,
            &mut FixedClock::new(1.0 / 60.0),
            &mut window,
            &mut canvas,
        );
        assert_eq!(summary.frames, 30);
        assert_eq!(canvas.frames(), 30);
        assert_eq!(state.time_ticks, 30);
        assert_eq!(summary.asteroids_spawned, 30);
    }

    #[test]
    fn test_large_frame_time_is_clamped() {
        let mut state = state(Settings::default());
        run(
            &mut state,
            &mut ScriptedInput::default(),
            &mut FixedClock::new(5.0),
            &mut FrameBudget::new(1),
            &mut RecordingCanvas::default(),
        );
        assert!((state.elapsed - f64::from(MAX_FRAME_DT)).abs() < 1e-6);
    }

    #[test]
    fn test_firing_draws_bullets() {
        let mut state = state(Settings::default());
        state.asteroid_timer.threshold = f32::INFINITY;
        let mut input = ScriptedInput::new(vec![InputFrame {
            fire: true,
            pointer: Vec2::new(1200.0, 300.0),
            ..Default::default()
        }]);
        let mut canvas = RecordingCanvas::default();

        let summary = run(
            &mut state,
            &mut input,
            &mut FixedClock::new(0.06),
            &mut FrameBudget::new(10),
            &mut canvas,
        );
        // Every second frame passes the 0.1s fire interval
        assert_eq!(summary.bullets_fired, 5);
        let bullets = canvas.count(|c| matches!(c, DrawCommand::Rect { size, .. } if size.x > 1.0));
        assert_eq!(bullets as u64, summary.bullets_fired);
    }

    #[test]
    fn test_overlay_drawn_when_enabled() {
        let mut state = state(Settings {
            debug_overlay: true,
            ..Settings::default()
        });
        let mut canvas = RecordingCanvas::default();
        run(
            &mut state,
            &mut ScriptedInput::default(),
            &mut FixedClock::new(1.0 / 60.0),
            &mut FrameBudget::new(1),
            &mut canvas,
        );
        assert_eq!(canvas.count(|c| matches!(c, DrawCommand::Line { .. })), 1);
    }
}
