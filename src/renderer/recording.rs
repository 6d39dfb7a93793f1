//! Renderer that records draw calls instead of drawing (for tests)

use glam::Vec2;

use super::{Color, Renderer, TextAnchor};
use crate::Rect;
use crate::platform::PlatformError;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Rect {
        rect: Rect,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        anchor: TextAnchor,
        color: Color,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    current: Vec<DrawCommand>,
    frames: Vec<Vec<DrawCommand>>,
}

impl RecordingRenderer {
    /// Number of presented frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Vec<DrawCommand>] {
        &self.frames
    }

    /// Commands of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Text drawn in the most recently presented frame
    pub fn texts(&self) -> Vec<String> {
        self.last_frame()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, color: Color) {
        self.current.push(DrawCommand::Clear(color));
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.current.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.current.push(DrawCommand::Rect { rect, color });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, anchor: TextAnchor, color: Color) {
        self.current.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            anchor,
            color,
        });
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        self.frames.push(std::mem::take(&mut self.current));
        Ok(())
    }
}
