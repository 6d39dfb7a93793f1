//! Combat resolution: projectile travel, hits, chains and scoring
//!
//! Collections are scanned as snapshots: kills and spent projectiles are
//! flagged during the scan and chain continuations are queued, then all of
//! it is applied once the scan is done.

use glam::Vec2;

use super::state::{Enemy, GameState, Projectile};

/// Whether circles of the given radii centered `distance` apart overlap
#[inline]
pub fn circles_overlap(distance: f32, r1: f32, r2: f32) -> bool {
    distance < r1 + r2
}

/// Direct hit, or inside the projectile's explosion radius
pub fn projectile_hits(projectile: &Projectile, enemy: &Enemy) -> bool {
    let distance = enemy.pos.distance(projectile.pos);
    circles_overlap(distance, enemy.radius, projectile.radius)
        || (projectile.explosion_radius > 0.0 && distance < projectile.explosion_radius)
}

/// Index of the enemy nearest to `from` among those still alive.
/// Ties keep the earliest enemy.
pub fn nearest_alive(enemies: &[Enemy], alive: &[bool], from: Vec2) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, enemy) in enemies.iter().enumerate() {
        if !alive[i] {
            continue;
        }
        let dist = enemy.pos.distance(from);
        if best.is_none_or(|(_, best_dist)| dist < best_dist) {
            best = Some((i, dist));
        }
    }
    best.map(|(i, _)| i)
}

/// Move every projectile, then drop those beyond range of the player
pub fn advance_projectiles(state: &mut GameState) {
    let center = state.player.pos;
    let max_range = state.tuning.projectile_max_range;
    for projectile in state.player.projectiles.iter_mut() {
        projectile.advance();
    }
    state
        .player
        .projectiles
        .retain(|p| p.pos.distance(center) <= max_range);
}

/// Outcome of one combat pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatReport {
    pub kills: u32,
    pub chains_spawned: u32,
    /// An enemy touched the player
    pub player_hit: bool,
}

/// Move enemies and resolve projectile hits for one tick.
///
/// Each enemy is moved, then tested against the live projectiles in order;
/// the first hit kills it and spends that projectile. After that the enemy
/// is tested against the player. Touching ends the pass at once: kills made
/// so far are still applied, later enemies are left untouched.
pub fn resolve_combat(state: &mut GameState) -> CombatReport {
    let mut report = CombatReport::default();
    let enemy_count = state.enemies.len();
    let projectile_count = state.player.projectiles.len();

    let mut alive = vec![true; enemy_count];
    let mut spent = vec![false; projectile_count];
    let mut chained: Vec<Projectile> = Vec::new();

    for ei in 0..enemy_count {
        state.enemies[ei].move_toward(state.player.pos);

        for pi in 0..projectile_count {
            if spent[pi] {
                continue;
            }
            let projectile = &state.player.projectiles[pi];
            if !projectile_hits(projectile, &state.enemies[ei]) {
                continue;
            }

            alive[ei] = false;
            spent[pi] = true;
            report.kills += 1;
            log::debug!(
                "Enemy killed at ({:.1}, {:.1})",
                state.enemies[ei].pos.x,
                state.enemies[ei].pos.y
            );

            if projectile.chain_count > 0 {
                if let Some(target) = nearest_alive(&state.enemies, &alive, projectile.pos) {
                    let target_pos = state.enemies[target].pos;
                    log::trace!(
                        "Chain jump to enemy {} ({} left)",
                        target,
                        projectile.chain_count - 1
                    );
                    chained.push(
                        Projectile::aimed_at(
                            projectile.pos,
                            target_pos,
                            state.tuning.projectile_speed,
                            state.tuning.projectile_radius,
                        )
                        .with_payload(projectile.chain_count - 1, projectile.explosion_radius),
                    );
                    report.chains_spawned += 1;
                }
            }

            state.award_kill();
            break;
        }

        let enemy = &state.enemies[ei];
        if circles_overlap(
            state.player.pos.distance(enemy.pos),
            state.player.radius,
            enemy.radius,
        ) {
            report.player_hit = true;
            apply_removals(state, &alive, &spent, chained);
            return report;
        }
    }

    apply_removals(state, &alive, &spent, chained);
    report
}

/// Drop killed enemies and spent projectiles, then add chained projectiles
fn apply_removals(
    state: &mut GameState,
    alive: &[bool],
    spent: &[bool],
    chained: Vec<Projectile>,
) {
    let mut index = 0;
    state.enemies.retain(|_| {
        let keep = alive[index];
        index += 1;
        keep
    });
    let mut index = 0;
    state.player.projectiles.retain(|_| {
        let keep = !spent[index];
        index += 1;
        keep
    });
    state.player.projectiles.extend(chained);
}
