//! Scripted platform for tests and the headless demo

use glam::Vec2;

use super::{FrameClock, Input, Key, PointerButton, Window};

/// Input state for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    pub held: Vec<Key>,
    pub pressed: Vec<Key>,
    /// Left pointer button held
    pub fire: bool,
    pub pointer: Vec2,
}

/// Plays back a list of frames; the last frame repeats once the script runs out
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<InputFrame>,
    /// Index of the frame after the current one
    next: usize,
    current: InputFrame,
}

impl ScriptedInput {
    pub fn new(frames: Vec<InputFrame>) -> Self {
        Self {
            frames,
            next: 0,
            current: InputFrame::default(),
        }
    }

    pub fn current(&self) -> &InputFrame {
        &self.current
    }
}

impl Input for ScriptedInput {
    fn poll(&mut self) {
        if let Some(frame) = self.frames.get(self.next) {
            self.current = frame.clone();
            self.next += 1;
        } else {
            // Presses are edge events; they do not repeat
            self.current.pressed.clear();
        }
    }

    fn is_key_held(&self, key: Key) -> bool {
        self.current.held.contains(&key)
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.current.pressed.contains(&key)
    }

    fn is_pointer_button_held(&self, button: PointerButton) -> bool {
        button == PointerButton::Left && self.current.fire
    }

    fn pointer_position(&self) -> Vec2 {
        self.current.pointer
    }
}

/// Constant frame time
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub dt: f32,
}

impl FixedClock {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }
}

impl FrameClock for FixedClock {
    fn elapsed_since_last_tick(&mut self) -> f32 {
        self.dt
    }
}

/// Window that asks to close after a fixed number of frames
#[derive(Debug, Clone, Copy)]
pub struct FrameBudget {
    remaining: u64,
}

impl FrameBudget {
    pub fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Window for FrameBudget {
    fn should_close(&self) -> bool {
        self.remaining == 0
    }

    fn end_frame(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}
