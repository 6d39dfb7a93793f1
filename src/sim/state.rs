//! Game state and core entity types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::spawn::Spawner;
use super::tick::MoveKeys;
use super::upgrade::UpgradeMenu;
use crate::tuning::Tuning;
use crate::{cartesian_to_polar, polar_to_cartesian};

/// Current phase of a run
#[derive(Debug, Clone, PartialEq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Simulation frozen while the player picks an upgrade
    Choosing(UpgradeMenu),
    /// Player was touched by an enemy
    GameOver,
}

/// Player upgrade kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    SplitShot,
    ChainShot,
    ExplosionShot,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 3] = [
        UpgradeKind::SplitShot,
        UpgradeKind::ChainShot,
        UpgradeKind::ExplosionShot,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            UpgradeKind::SplitShot => "Split Shot",
            UpgradeKind::ChainShot => "Chain Shot",
            UpgradeKind::ExplosionShot => "Explosion Shot",
        }
    }
}

/// Level per upgrade kind (all start at 0, no cap)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrades {
    pub split_shot: u32,
    pub chain_shot: u32,
    pub explosion_shot: u32,
}

impl Upgrades {
    pub fn level(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::SplitShot => self.split_shot,
            UpgradeKind::ChainShot => self.chain_shot,
            UpgradeKind::ExplosionShot => self.explosion_shot,
        }
    }

    /// Raise a level by one, returning the new level
    pub fn increment(&mut self, kind: UpgradeKind) -> u32 {
        let level = match kind {
            UpgradeKind::SplitShot => &mut self.split_shot,
            UpgradeKind::ChainShot => &mut self.chain_shot,
            UpgradeKind::ExplosionShot => &mut self.explosion_shot,
        };
        *level += 1;
        *level
    }

    /// Levels in `UpgradeKind::ALL` order
    pub fn levels(&self) -> [u32; 3] {
        UpgradeKind::ALL.map(|kind| self.level(kind))
    }
}

/// A projectile fired by the player (or spawned by a chain)
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    /// Per-tick displacement; direction never changes after creation
    pub vel: Vec2,
    pub radius: f32,
    /// Remaining chain jumps
    pub chain_count: u32,
    /// Splash radius (0 = none)
    pub explosion_radius: f32,
}

impl Projectile {
    /// Projectile at `pos` heading toward `target`, or standing still if they coincide
    pub fn aimed_at(pos: Vec2, target: Vec2, speed: f32, radius: f32) -> Self {
        Self {
            pos,
            vel: (target - pos).normalize_or_zero() * speed,
            radius,
            chain_count: 0,
            explosion_radius: 0.0,
        }
    }

    /// Projectile at `pos` heading along `angle` (radians)
    pub fn at_angle(pos: Vec2, angle: f32, speed: f32, radius: f32) -> Self {
        Self {
            pos,
            vel: polar_to_cartesian(speed, angle),
            radius,
            chain_count: 0,
            explosion_radius: 0.0,
        }
    }

    pub fn with_payload(mut self, chain_count: u32, explosion_radius: f32) -> Self {
        self.chain_count = chain_count;
        self.explosion_radius = explosion_radius;
        self
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// An enemy dot chasing the player
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl Enemy {
    /// Spawn on a circle of `distance` around `center`
    pub fn at_angle(center: Vec2, angle: f32, distance: f32, tuning: &Tuning) -> Self {
        Self {
            pos: center + polar_to_cartesian(distance, angle),
            radius: tuning.enemy_radius,
            speed: tuning.enemy_speed,
        }
    }

    /// Step toward `target` by `speed`; no-op when already there
    pub fn move_toward(&mut self, target: Vec2) {
        let to_target = target - self.pos;
        if to_target != Vec2::ZERO {
            self.pos += to_target.normalize() * self.speed;
        }
    }
}

/// The player's dot
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub last_shot_ms: u64,
    pub shoot_delay_ms: u64,
    pub upgrades: Upgrades,
    /// Active projectiles (insertion order matters for collision)
    pub projectiles: Vec<Projectile>,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning, now_ms: u64) -> Self {
        Self {
            pos,
            radius: tuning.player_radius,
            speed: tuning.player_speed,
            last_shot_ms: now_ms,
            shoot_delay_ms: tuning.shoot_delay_ms,
            upgrades: Upgrades::default(),
            projectiles: Vec::new(),
        }
    }

    /// Per-tick movement; each held direction applies independently
    pub fn move_by(&mut self, keys: MoveKeys) {
        if keys.up {
            self.pos.y -= self.speed;
        }
        if keys.down {
            self.pos.y += self.speed;
        }
        if keys.left {
            self.pos.x -= self.speed;
        }
        if keys.right {
            self.pos.x += self.speed;
        }
    }

    /// Whether the shot delay has elapsed at `now_ms`
    pub fn can_shoot(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_shot_ms) > self.shoot_delay_ms
    }

    /// Fire toward `target` (world space) if the delay allows.
    ///
    /// Creates one primary projectile plus one extra per Split Shot level,
    /// each rotated a further `split_spread` from the primary. All of them
    /// carry the Chain Shot level and the Explosion Shot radius.
    /// Returns the number of projectiles created.
    pub fn shoot(&mut self, now_ms: u64, target: Vec2, tuning: &Tuning) -> usize {
        if !self.can_shoot(now_ms) {
            return 0;
        }
        self.last_shot_ms = now_ms;

        let chain_count = self.upgrades.chain_shot;
        let explosion_radius =
            self.upgrades.explosion_shot as f32 * tuning.explosion_radius_per_level;

        let primary = Projectile::aimed_at(
            self.pos,
            target,
            tuning.projectile_speed,
            tuning.projectile_radius,
        )
        .with_payload(chain_count, explosion_radius);
        let (_, base_angle) = cartesian_to_polar(primary.vel);
        self.projectiles.push(primary);

        let splits = self.upgrades.split_shot;
        for i in 1..=splits {
            let angle = base_angle + tuning.split_spread * i as f32;
            self.projectiles.push(
                Projectile::at_angle(
                    self.pos,
                    angle,
                    tuning.projectile_speed,
                    tuning.projectile_radius,
                )
                .with_payload(chain_count, explosion_radius),
            );
        }

        splits as usize + 1
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn angles and upgrade offers
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub camera: Camera,
    pub player: Player,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub spawner: Spawner,
    pub score: u64,
    /// Score at the last upgrade offer
    pub last_upgrade_score: u64,
    pub phase: GamePhase,
    /// Simulated (running) ticks
    pub time_ticks: u64,
}

impl GameState {
    /// Start a run at wall-clock time `now_ms`
    pub fn new(seed: u64, tuning: Tuning, now_ms: u64) -> Self {
        let viewport = Vec2::new(tuning.screen_width, tuning.screen_height);
        let camera = Camera::new(viewport, tuning.zoom_decay_per_sec, tuning.min_zoom);
        let player = Player::new(viewport / 2.0, &tuning, now_ms);
        let spawner = Spawner::new(&tuning, now_ms);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            camera,
            player,
            enemies: Vec::new(),
            spawner,
            score: 0,
            last_upgrade_score: 0,
            phase: GamePhase::Running,
            time_ticks: 0,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Add kill score and open the upgrade menu on each threshold crossing
    pub fn award_kill(&mut self) {
        self.score += self.tuning.score_per_kill;
        if self.score - self.last_upgrade_score >= self.tuning.upgrade_score_step {
            self.last_upgrade_score = self.score;
            let menu = UpgradeMenu::offer(&mut self.rng, &self.player.upgrades, &self.tuning);
            log::info!(
                "Score {} reached, offering upgrades: {}",
                self.score,
                menu.describe()
            );
            self.phase = GamePhase::Choosing(menu);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(7, tuning(), 0);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.camera.focus, state.player.pos);
        assert!(state.enemies.is_empty());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.upgrades, Upgrades::default());
    }

    #[test]
    fn test_move_keys_independent() {
        let mut player = Player::new(Vec2::ZERO, &tuning(), 0);
        player.move_by(MoveKeys {
            up: true,
            right: true,
            ..Default::default()
        });
        assert_eq!(player.pos, Vec2::new(5.0, -5.0));

        // Opposite keys cancel
        player.move_by(MoveKeys {
            up: true,
            down: true,
            left: true,
            right: true,
        });
        assert_eq!(player.pos, Vec2::new(5.0, -5.0));
    }

    #[test]
    fn test_shoot_gate() {
        let t = tuning();
        let mut player = Player::new(Vec2::ZERO, &t, 0);
        assert_eq!(player.shoot(500, Vec2::X, &t), 0); // delay must be exceeded
        assert_eq!(player.shoot(501, Vec2::X, &t), 1);
        assert_eq!(player.last_shot_ms, 501);
        assert_eq!(player.shoot(900, Vec2::X, &t), 0);
        assert_eq!(player.last_shot_ms, 501);
        assert_eq!(player.projectiles.len(), 1);
    }

    #[test]
    fn test_shot_aims_at_target() {
        let t = tuning();
        let mut player = Player::new(Vec2::new(10.0, 10.0), &t, 0);
        player.shoot(1000, Vec2::new(10.0, 110.0), &t);
        let p = &player.projectiles[0];
        assert!((p.vel - Vec2::new(0.0, 7.0)).length() < 1e-5);
        assert_eq!(p.radius, 5.0);
    }

    #[test]
    fn test_shot_at_own_position_is_stationary() {
        let t = tuning();
        let mut player = Player::new(Vec2::new(3.0, 4.0), &t, 0);
        player.shoot(1000, Vec2::new(3.0, 4.0), &t);
        assert_eq!(player.projectiles[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_split_shot_count_and_payload() {
        let t = tuning();
        let mut player = Player::new(Vec2::ZERO, &t, 0);
        player.upgrades.split_shot = 3;
        player.upgrades.chain_shot = 2;
        player.upgrades.explosion_shot = 1;

        assert_eq!(player.shoot(1000, Vec2::new(100.0, 0.0), &t), 4);
        assert_eq!(player.projectiles.len(), 4);
        for (i, p) in player.projectiles.iter().enumerate() {
            assert_eq!(p.chain_count, 2);
            assert_eq!(p.explosion_radius, 30.0);
            assert!((p.vel.length() - 7.0).abs() < 1e-4);
            let (_, angle) = cartesian_to_polar(p.vel);
            assert!((angle - 0.2 * i as f32).abs() < 1e-5);
        }
    }

    #[test]
    fn test_enemy_spawn_position() {
        let enemy = Enemy::at_angle(Vec2::new(400.0, 300.0), 0.0, 800.0, &tuning());
        assert_eq!(enemy.pos, Vec2::new(1200.0, 300.0));
        assert_eq!(enemy.radius, 15.0);
    }

    #[test]
    fn test_enemy_moves_toward_target() {
        let mut enemy = Enemy::at_angle(Vec2::ZERO, 0.0, 100.0, &tuning());
        enemy.move_toward(Vec2::ZERO);
        assert_eq!(enemy.pos, Vec2::new(98.0, 0.0));
    }

    #[test]
    fn test_enemy_coincident_is_noop() {
        let mut enemy = Enemy::at_angle(Vec2::ZERO, 0.0, 0.0, &tuning());
        enemy.move_toward(Vec2::ZERO);
        assert_eq!(enemy.pos, Vec2::ZERO);
        assert!(!enemy.pos.is_nan());
    }

    #[test]
    fn test_upgrade_levels() {
        let mut upgrades = Upgrades::default();
        assert_eq!(upgrades.increment(UpgradeKind::ChainShot), 1);
        assert_eq!(upgrades.increment(UpgradeKind::ChainShot), 2);
        assert_eq!(upgrades.level(UpgradeKind::ChainShot), 2);
        assert_eq!(upgrades.levels(), [0, 2, 0]);
    }

    #[test]
    fn test_award_kill_triggers_choice_once_per_step() {
        let mut state = GameState::new(1, tuning(), 0);
        for _ in 0..4 {
            state.award_kill();
            assert_eq!(state.phase, GamePhase::Running);
        }
        state.award_kill();
        assert_eq!(state.score, 500);
        assert!(matches!(state.phase, GamePhase::Choosing(_)));
        assert_eq!(state.last_upgrade_score, 500);

        state.phase = GamePhase::Running;
        state.award_kill();
        assert_eq!(state.phase, GamePhase::Running);
    }
}
