//! Keyboard input.

pub mod keyboard;
