//! Dot Survivor - a minimal arcade survivor game
//!
//! Core modules:
//! - `sim`: Simulation core (camera, entities, spawning, combat, upgrades)
//! - `game`: Frame loop driving the simulation through the platform seams
//! - `platform`: Input/clock abstraction (terminal and scripted backends)
//! - `renderer`: Drawing abstraction and scene composition
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::{Game, RunEnd, RunOutcome};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Default balance constants (see `Tuning` for the runtime values)
pub mod consts {
    /// Logical screen size
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Frame cap
    pub const TARGET_FPS: u32 = 60;

    /// Player defaults (speed is per tick, not per second)
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const SHOOT_DELAY_MS: u64 = 500;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 15.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_SPAWN_DISTANCE: f32 = 800.0;
    pub const ENEMY_SPAWN_INTERVAL_MS: u64 = 1000;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 7.0;
    /// Projectiles further than this from the player are culled
    pub const PROJECTILE_MAX_RANGE: f32 = 2000.0;
    /// Angle between split-shot copies (radians)
    pub const SPLIT_SPREAD: f32 = 0.2;
    /// Explosion radius per Explosion Shot level
    pub const EXPLOSION_RADIUS_PER_LEVEL: f32 = 30.0;

    /// Camera zoom-out: multiplier per second, and the floor
    pub const ZOOM_DECAY_PER_SEC: f32 = 0.98;
    pub const MIN_ZOOM: f32 = 0.2;

    /// Scoring
    pub const SCORE_PER_KILL: u64 = 100;
    pub const UPGRADE_SCORE_STEP: u64 = 500;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

/// Axis-aligned screen-space rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Half-open containment: left/top edges inside, right/bottom outside
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x < max.x && point.y >= self.min.y && point.y < max.y
    }
}
