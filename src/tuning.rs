//! Game balance and runtime tuning
//!
//! Defaults reproduce the classic feel. A JSON file can override any subset
//! of fields; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure to load or accept a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// All balance constants used by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub target_fps: u32,

    // === Player ===
    pub player_radius: f32,
    /// Displacement per tick while a direction is held
    pub player_speed: f32,
    pub shoot_delay_ms: u64,
    /// Fire every tick the shot delay allows, without clicking
    pub auto_fire: bool,

    // === Enemies ===
    pub enemy_radius: f32,
    pub enemy_speed: f32,
    pub enemy_spawn_distance: f32,
    pub enemy_spawn_interval_ms: u64,

    // === Projectiles ===
    pub projectile_radius: f32,
    pub projectile_speed: f32,
    pub projectile_max_range: f32,
    pub split_spread: f32,
    pub explosion_radius_per_level: f32,

    // === Camera ===
    pub zoom_decay_per_sec: f32,
    pub min_zoom: f32,

    // === Scoring ===
    pub score_per_kill: u64,
    pub upgrade_score_step: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            target_fps: TARGET_FPS,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            shoot_delay_ms: SHOOT_DELAY_MS,
            auto_fire: true,

            enemy_radius: ENEMY_RADIUS,
            enemy_speed: ENEMY_SPEED,
            enemy_spawn_distance: ENEMY_SPAWN_DISTANCE,
            enemy_spawn_interval_ms: ENEMY_SPAWN_INTERVAL_MS,

            projectile_radius: PROJECTILE_RADIUS,
            projectile_speed: PROJECTILE_SPEED,
            projectile_max_range: PROJECTILE_MAX_RANGE,
            split_spread: SPLIT_SPREAD,
            explosion_radius_per_level: EXPLOSION_RADIUS_PER_LEVEL,

            zoom_decay_per_sec: ZOOM_DECAY_PER_SEC,
            min_zoom: MIN_ZOOM,

            score_per_kill: SCORE_PER_KILL,
            upgrade_score_step: UPGRADE_SCORE_STEP,
        }
    }
}

impl Tuning {
    /// Environment variable naming an optional tuning file
    pub const ENV_VAR: &'static str = "DOT_SURVIVOR_TUNING";

    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load from `DOT_SURVIVOR_TUNING` if set, defaults otherwise
    pub fn from_env() -> Result<Self, TuningError> {
        match std::env::var_os(Self::ENV_VAR) {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default tuning");
                Ok(Self::default())
            }
        }
    }

    /// Reject values that would break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive: [(&'static str, f32); 10] = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_radius", self.player_radius),
            ("player_speed", self.player_speed),
            ("enemy_radius", self.enemy_radius),
            ("enemy_speed", self.enemy_speed),
            ("enemy_spawn_distance", self.enemy_spawn_distance),
            ("projectile_radius", self.projectile_radius),
            ("projectile_speed", self.projectile_speed),
            ("projectile_max_range", self.projectile_max_range),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be positive",
                });
            }
        }

        let nonzero: [(&'static str, u64); 4] = [
            ("target_fps", u64::from(self.target_fps)),
            ("shoot_delay_ms", self.shoot_delay_ms),
            ("enemy_spawn_interval_ms", self.enemy_spawn_interval_ms),
            ("upgrade_score_step", self.upgrade_score_step),
        ];
        for (field, value) in nonzero {
            if value == 0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be positive",
                });
            }
        }

        let unit_interval = [
            ("min_zoom", self.min_zoom),
            ("zoom_decay_per_sec", self.zoom_decay_per_sec),
        ];
        for (field, value) in unit_interval {
            if !(value > 0.0 && value <= 1.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be in (0, 1]",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.projectile_max_range, 2000.0);
        assert_eq!(tuning.upgrade_score_step, 500);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "enemy_speed": 3.5, "auto_fire": false }"#).unwrap();
        assert_eq!(tuning.enemy_speed, 3.5);
        assert!(!tuning.auto_fire);
        assert_eq!(tuning.player_speed, PLAYER_SPEED);
    }

    #[test]
    fn test_rejects_bad_zoom() {
        let err = Tuning::from_json(r#"{ "min_zoom": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "min_zoom", .. }));

        let err = Tuning::from_json(r#"{ "zoom_decay_per_sec": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "zoom_decay_per_sec", .. }));
    }

    #[test]
    fn test_rejects_non_positive_enemy_and_timing_values() {
        for json in [
            r#"{ "enemy_speed": 0.0 }"#,
            r#"{ "enemy_speed": -2.0 }"#,
            r#"{ "enemy_spawn_distance": 0.0 }"#,
        ] {
            let err = Tuning::from_json(json).unwrap_err();
            assert!(matches!(err, TuningError::Invalid { reason: "must be positive", .. }));
        }

        let err = Tuning::from_json(r#"{ "shoot_delay_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "shoot_delay_ms", .. }));

        let err = Tuning::from_json(r#"{ "target_fps": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "target_fps", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }

    #[test]
    fn test_json_roundtrip_of_defaults() {
        let json = serde_json::to_string(&Tuning::default()).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }
}
