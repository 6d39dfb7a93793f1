//! Rendering module
//!
//! `Renderer` is the drawing seam: screen-space primitives plus `present`.
//! `scene` turns a `GameState` into primitives through the camera.

pub mod recording;
pub mod scene;
pub mod terminal;

pub use recording::{DrawCommand, RecordingRenderer};
pub use scene::render_frame;
pub use terminal::TerminalRenderer;

use glam::Vec2;

use crate::Rect;
use crate::platform::PlatformError;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0, 0, 0);
    pub const TEXT: Color = Color::rgb(255, 255, 255);
    pub const PLAYER: Color = Color::rgb(0, 0, 255);
    pub const ENEMY: Color = Color::rgb(255, 0, 0);
    pub const PROJECTILE: Color = Color::rgb(255, 255, 255);
    pub const MENU_BORDER: Color = Color::rgb(255, 255, 255);
}

/// Where a text position sits relative to the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    Center,
}

/// Screen-space drawing primitives
pub trait Renderer {
    /// Fill the whole frame
    fn clear(&mut self, color: Color);

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Rectangle outline
    fn draw_rect(&mut self, rect: Rect, color: Color);

    fn draw_text(&mut self, text: &str, pos: Vec2, anchor: TextAnchor, color: Color);

    /// Show the finished frame
    fn present(&mut self) -> Result<(), PlatformError>;
}
