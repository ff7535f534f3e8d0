//! Asteroid Arena entry point
//!
//! Runs a scripted headless session: the ship circles the field, sweeps its
//! aim around and cycles through the weapons while holding fire.
//!
//! Usage: `asteroid-arena [settings.json] [frames]`

use std::f32::consts::TAU;
use std::path::Path;
use std::process::ExitCode;

use glam::Vec2;

use asteroid_arena::Settings;
use asteroid_arena::driver;
use asteroid_arena::platform::Key;
use asteroid_arena::platform::WEAPON_KEYS;
use asteroid_arena::platform::headless::{FixedClock, FrameBudget, InputFrame, ScriptedInput};
use asteroid_arena::renderer::RecordingCanvas;
use asteroid_arena::sim::GameState;

const DEFAULT_FRAMES: u64 = 600;
const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames between weapon switches
const WEAPON_PERIOD: usize = 120;
/// Frames per movement leg
const LEG_FRAMES: usize = 90;

fn demo_script(frames: usize, ship_start: Vec2) -> Vec<InputFrame> {
    let legs = [Key::D, Key::S, Key::A, Key::W];
    (0..frames)
        .map(|frame| {
            let angle = frame as f32 / 240.0 * TAU;
            let pointer = ship_start + Vec2::from_angle(angle) * 400.0;
            let pressed = if frame % WEAPON_PERIOD == 0 {
                vec![WEAPON_KEYS[(frame / WEAPON_PERIOD) % WEAPON_KEYS.len()]]
            } else {
                Vec::new()
            };
            InputFrame {
                held: vec![legs[(frame / LEG_FRAMES) % legs.len()]],
                pressed,
                fire: true,
                pointer,
            }
        })
        .collect()
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Asteroid Arena (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load(Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings: {}", e);
                return ExitCode::from(2);
            }
        },
        None => Settings::default(),
    };
    let frames = match args.next().map(|arg| arg.parse::<u64>()) {
        Some(Ok(frames)) => frames,
        Some(Err(e)) => {
            log::error!("Invalid frame count: {}", e);
            return ExitCode::from(2);
        }
        None => DEFAULT_FRAMES,
    };

    let mut state = match GameState::new(&settings) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to create game state: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let script = demo_script(frames as usize, settings.ship_start);
    let mut input = ScriptedInput::new(script);
    let mut clock = FixedClock::new(FRAME_DT);
    let mut window = FrameBudget::new(frames);
    let mut canvas = RecordingCanvas::default();

    let summary = driver::run(&mut state, &mut input, &mut clock, &mut window, &mut canvas);

    log::info!(
        "Draw calls: {} over {} frames",
        canvas.total_calls(),
        canvas.frames()
    );
    println!("frames:             {}", summary.frames);
    println!("bullets fired:      {}", summary.bullets_fired);
    println!("asteroids spawned:  {}", summary.asteroids_spawned);
    println!("asteroids destroyed: {}", summary.asteroids_destroyed);
    println!("entities reaped:    {}", summary.entities_reaped);
    println!(
        "live at exit:       {} asteroids, {} bullets",
        state.asteroids.len(),
        state.bullets.len()
    );
    ExitCode::SUCCESS
}
