//! Headless platform driven by a pre-recorded input script
//!
//! Each `poll_events` consumes one scripted frame. The clock is virtual and
//! advances by a fixed frame duration in `wait_for_frame_budget`. When the
//! script runs out the platform reports `Quit`.

use std::collections::VecDeque;

use glam::Vec2;

use super::{Platform, PlatformError, PlatformEvent};
use crate::sim::MoveKeys;

/// Input for one frame
#[derive(Debug, Clone, Default)]
pub struct ScriptedFrame {
    pub events: Vec<PlatformEvent>,
    pub keys: MoveKeys,
    /// New pointer position, if it moved
    pub pointer: Option<Vec2>,
}

#[derive(Debug, Clone)]
pub struct ScriptedPlatform {
    frames: VecDeque<ScriptedFrame>,
    keys: MoveKeys,
    pointer: Vec2,
    now_ms: u64,
    frame_ms: u64,
}

impl ScriptedPlatform {
    pub fn new(frame_ms: u64) -> Self {
        Self {
            frames: VecDeque::new(),
            keys: MoveKeys::default(),
            pointer: Vec2::ZERO,
            now_ms: 0,
            frame_ms,
        }
    }

    pub fn with_pointer(mut self, pointer: Vec2) -> Self {
        self.pointer = pointer;
        self
    }

    /// Append one frame
    pub fn then(mut self, frame: ScriptedFrame) -> Self {
        self.frames.push_back(frame);
        self
    }

    /// Append `count` frames with no input
    pub fn idle(self, count: usize) -> Self {
        self.hold(MoveKeys::default(), count)
    }

    /// Append `count` frames holding `keys`
    pub fn hold(mut self, keys: MoveKeys, count: usize) -> Self {
        for _ in 0..count {
            self.frames.push_back(ScriptedFrame {
                keys,
                ..Default::default()
            });
        }
        self
    }

    /// Append a frame with a pointer-down at `pos`
    pub fn click(self, pos: Vec2) -> Self {
        self.then(ScriptedFrame {
            events: vec![PlatformEvent::PointerDown(pos)],
            pointer: Some(pos),
            ..Default::default()
        })
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl Platform for ScriptedPlatform {
    fn poll_events(&mut self) -> Result<Vec<PlatformEvent>, PlatformError> {
        match self.frames.pop_front() {
            Some(frame) => {
                self.keys = frame.keys;
                if let Some(pointer) = frame.pointer {
                    self.pointer = pointer;
                }
                Ok(frame.events)
            }
            None => Ok(vec![PlatformEvent::Quit]),
        }
    }

    fn key_state(&self) -> MoveKeys {
        self.keys
    }

    fn pointer_position(&self) -> Vec2 {
        self.pointer
    }

    fn now_millis(&self) -> u64 {
        self.now_ms
    }

    fn wait_for_frame_budget(&mut self, _target_fps: u32) -> f32 {
        self.now_ms += self.frame_ms;
        self.frame_ms as f32 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_playback() {
        let keys = MoveKeys {
            left: true,
            ..Default::default()
        };
        let mut platform = ScriptedPlatform::new(20)
            .hold(keys, 1)
            .click(Vec2::new(5.0, 6.0));

        assert!(platform.poll_events().unwrap().is_empty());
        assert_eq!(platform.key_state(), keys);

        assert_eq!(platform.wait_for_frame_budget(60), 0.02);
        assert_eq!(platform.now_millis(), 20);

        let events = platform.poll_events().unwrap();
        assert_eq!(events, vec![PlatformEvent::PointerDown(Vec2::new(5.0, 6.0))]);
        assert_eq!(platform.pointer_position(), Vec2::new(5.0, 6.0));
        assert_eq!(platform.key_state(), MoveKeys::default());
        assert_eq!(platform.remaining(), 0);

        assert_eq!(platform.poll_events().unwrap(), vec![PlatformEvent::Quit]);
    }
}
