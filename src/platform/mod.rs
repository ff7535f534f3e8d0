//! Platform abstraction layer
//!
//! The simulation never talks to a window system directly. It sees:
//! - Input (keys, pointer)
//! - Frame timing
//! - Window lifecycle (close requests)
//!
//! `headless` provides scripted implementations for tests and the demo binary.

pub mod headless;

use glam::Vec2;

use crate::sim::TickInput;

/// Keys the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    One,
    Two,
    Three,
}

/// Keys that select bullet types, in type order
pub const WEAPON_KEYS: [Key; 3] = [Key::One, Key::Two, Key::Three];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
}

/// Keyboard and pointer state for the current frame
pub trait Input {
    /// Refresh state for a new frame
    fn poll(&mut self) {}
    fn is_key_held(&self, key: Key) -> bool;
    /// Went down this frame
    fn is_key_pressed(&self, key: Key) -> bool;
    fn is_pointer_button_held(&self, button: PointerButton) -> bool;
    fn pointer_position(&self) -> Vec2;
}

/// Source of frame time
pub trait FrameClock {
    /// Seconds since the previous call
    fn elapsed_since_last_tick(&mut self) -> f32;
}

/// Window lifecycle
pub trait Window {
    fn should_close(&self) -> bool;
    /// Called after each presented frame
    fn end_frame(&mut self) {}
}

/// Translate raw input into one tick's commands
pub fn read_tick_input<I: Input + ?Sized>(input: &I) -> TickInput {
    TickInput {
        up: input.is_key_held(Key::W),
        left: input.is_key_held(Key::A),
        down: input.is_key_held(Key::S),
        right: input.is_key_held(Key::D),
        pointer: Some(input.pointer_position()),
        fire: input.is_pointer_button_held(PointerButton::Left),
        select_bullet: WEAPON_KEYS.iter().position(|&k| input.is_key_pressed(k)),
    }
}

#[cfg(test)]
mod tests {
    use super::headless::{InputFrame, ScriptedInput};
    use super::*;

    #[test]
    fn test_read_tick_input() {
        let mut input = ScriptedInput::new(vec![InputFrame {
            held: vec![Key::W, Key::D],
            pressed: vec![Key::Two],
            fire: true,
            pointer: Vec2::new(10.0, 20.0),
        }]);
        input.poll();

        let tick = read_tick_input(&input);
        assert!(tick.up && tick.right);
        assert!(!tick.left && !tick.down);
        assert!(tick.fire);
        assert_eq!(tick.pointer, Some(Vec2::new(10.0, 20.0)));
        assert_eq!(tick.select_bullet, Some(1));
    }

    #[test]
    fn test_first_weapon_key_wins() {
        let mut input = ScriptedInput::new(vec![InputFrame {
            pressed: vec![Key::Three, Key::One],
            ..Default::default()
        }]);
        input.poll();
        assert_eq!(read_tick_input(&input).select_bullet, Some(0));
    }
}
