//! Per-frame simulation step
//!
//! One call advances the run by exactly one frame in a fixed order:
//! camera, shooting, movement, spawning, projectiles, combat.

use glam::Vec2;

use super::collision::{advance_projectiles, resolve_combat};
use super::state::{GamePhase, GameState};

/// Held movement directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Everything the simulation reads from the outside world for one frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub keys: MoveKeys,
    /// Pointer position (screen space)
    pub pointer: Vec2,
    /// Pointer-down positions since the last frame (screen space)
    pub clicks: Vec<Vec2>,
    /// Wall clock (ms) for shot and spawn gating
    pub now_ms: u64,
    /// Seconds since the previous frame, drives the zoom
    pub dt: f32,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    match &state.phase {
        GamePhase::GameOver => return,
        GamePhase::Choosing(menu) => {
            let choice = input.clicks.iter().find_map(|&click| menu.hit_test(click));
            if let Some(kind) = choice {
                let level = state.player.upgrades.increment(kind);
                log::info!("Upgrade chosen: {} (level {})", kind.label(), level);
                state.phase = GamePhase::Running;
            }
            // Frozen until a choice is made
            return;
        }
        GamePhase::Running => {}
    }

    state.time_ticks += 1;

    state.camera.follow(state.player.pos);
    state.camera.apply_zoom(input.dt);

    let aim = state.camera.screen_to_world(input.pointer);
    let mut fired = 0;
    if !input.clicks.is_empty() {
        fired += state.player.shoot(input.now_ms, aim, &state.tuning);
    }
    if state.tuning.auto_fire {
        fired += state.player.shoot(input.now_ms, aim, &state.tuning);
    }
    if fired > 0 {
        log::debug!("Fired {} projectile(s) toward ({:.1}, {:.1})", fired, aim.x, aim.y);
    }

    state.player.move_by(input.keys);

    if let Some(enemy) = state.spawner.update(
        input.now_ms,
        state.player.pos,
        &mut state.rng,
        &state.tuning,
    ) {
        state.enemies.push(enemy);
    }

    advance_projectiles(state);

    let report = resolve_combat(state);
    if report.player_hit {
        log::info!(
            "Game over after {} ticks with score {}",
            state.time_ticks,
            state.score
        );
        state.phase = GamePhase::GameOver;
    }
}
