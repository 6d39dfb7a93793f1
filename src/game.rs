//! Frame loop
//!
//! Each frame: drain platform events, build a `TickInput`, advance the
//! simulation, draw, present. The loop ends on quit or on player death.

use serde::Serialize;

use crate::platform::{Platform, PlatformError, PlatformEvent};
use crate::renderer::{Renderer, render_frame};
use crate::sim::{GameState, TickInput, Upgrades, tick};
use crate::tuning::Tuning;

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunEnd {
    Quit,
    Died,
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub end: RunEnd,
    pub seed: u64,
    pub score: u64,
    pub upgrades: Upgrades,
    /// Frames presented
    pub frames: u64,
    /// Simulated ticks (excludes time spent choosing upgrades)
    pub ticks: u64,
}

pub struct Game<P: Platform, R: Renderer> {
    platform: P,
    renderer: R,
    state: GameState,
    frames: u64,
}

impl<P: Platform, R: Renderer> Game<P, R> {
    pub fn new(platform: P, renderer: R, tuning: Tuning, seed: u64) -> Self {
        let state = GameState::new(seed, tuning, platform.now_millis());
        log::info!("New run with seed {}", seed);
        Self {
            platform,
            renderer,
            state,
            frames: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run one frame; `dt` is seconds since the previous frame
    pub fn step(&mut self, dt: f32) -> Result<Option<RunEnd>, PlatformError> {
        let mut clicks = Vec::new();
        for event in self.platform.poll_events()? {
            match event {
                PlatformEvent::Quit => return Ok(Some(RunEnd::Quit)),
                PlatformEvent::PointerDown(pos) => clicks.push(pos),
            }
        }

        let input = TickInput {
            keys: self.platform.key_state(),
            pointer: self.platform.pointer_position(),
            clicks,
            now_ms: self.platform.now_millis(),
            dt,
        };
        tick(&mut self.state, &input);

        render_frame(&mut self.renderer, &self.state);
        self.renderer.present()?;
        self.frames += 1;

        Ok(self.state.is_over().then_some(RunEnd::Died))
    }

    /// Loop until quit or death
    pub fn run(&mut self) -> Result<RunOutcome, PlatformError> {
        let fps = self.state.tuning.target_fps;
        let mut dt = 1.0 / fps as f32;
        loop {
            if let Some(end) = self.step(dt)? {
                let outcome = self.outcome(end);
                log::info!(
                    "Run ended ({:?}): score {}, {} frames",
                    outcome.end,
                    outcome.score,
                    outcome.frames
                );
                return Ok(outcome);
            }
            dt = self.platform.wait_for_frame_budget(fps);
        }
    }

    fn outcome(&self, end: RunEnd) -> RunOutcome {
        RunOutcome {
            end,
            seed: self.state.seed,
            score: self.state.score,
            upgrades: self.state.player.upgrades,
            frames: self.frames,
            ticks: self.state.time_ticks,
        }
    }
}
