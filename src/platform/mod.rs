//! Platform abstraction layer
//!
//! The game loop only talks to the outside world through `Platform`:
//! - Input events and held keys
//! - Pointer position
//! - Wall clock and frame pacing
//!
//! Backends: `terminal` (crossterm) and `scripted` (headless, for tests).

pub mod scripted;
pub mod terminal;

pub use scripted::{ScriptedFrame, ScriptedPlatform};
pub use terminal::TerminalPlatform;

use glam::Vec2;
use thiserror::Error;

use crate::sim::MoveKeys;

/// Discrete input events drained once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEvent {
    /// Window closed or quit key pressed
    Quit,
    /// Primary button pressed at a screen-space position
    PointerDown(Vec2),
}

/// Failures at the platform boundary
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("input reader stopped unexpectedly")]
    InputClosed,
}

/// Input, clock and pacing services for the game loop
pub trait Platform {
    /// Drain pending events
    fn poll_events(&mut self) -> Result<Vec<PlatformEvent>, PlatformError>;

    /// Directions currently held
    fn key_state(&self) -> MoveKeys;

    /// Last known pointer position (screen space)
    fn pointer_position(&self) -> Vec2;

    /// Monotonic milliseconds since the platform started
    fn now_millis(&self) -> u64;

    /// Sleep out the rest of the frame; returns seconds since the previous call
    fn wait_for_frame_budget(&mut self, target_fps: u32) -> f32;
}
