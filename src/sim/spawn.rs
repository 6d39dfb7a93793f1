//! Wall-clock gated enemy spawning

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::Enemy;
use crate::tuning::Tuning;

/// Emits at most one enemy per interval, on a ring around the player
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    pub last_spawn_ms: u64,
    pub interval_ms: u64,
    pub distance: f32,
}

impl Spawner {
    pub fn new(tuning: &Tuning, now_ms: u64) -> Self {
        Self {
            last_spawn_ms: now_ms,
            interval_ms: tuning.enemy_spawn_interval_ms,
            distance: tuning.enemy_spawn_distance,
        }
    }

    /// Spawn an enemy if more than `interval_ms` has passed since the last one
    pub fn update(
        &mut self,
        now_ms: u64,
        center: Vec2,
        rng: &mut impl Rng,
        tuning: &Tuning,
    ) -> Option<Enemy> {
        if now_ms.saturating_sub(self.last_spawn_ms) <= self.interval_ms {
            return None;
        }
        self.last_spawn_ms = now_ms;

        let angle = rng.random_range(0.0..TAU);
        let enemy = Enemy::at_angle(center, angle, self.distance, tuning);
        log::debug!(
            "Spawned enemy at ({:.1}, {:.1}), angle {:.2}",
            enemy.pos.x,
            enemy.pos.y,
            angle
        );
        Some(enemy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_interval() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning, 0);
        let mut rng = Pcg32::seed_from_u64(3);

        assert!(spawner.update(1000, Vec2::ZERO, &mut rng, &tuning).is_none());
        assert!(spawner.update(1001, Vec2::ZERO, &mut rng, &tuning).is_some());
        assert_eq!(spawner.last_spawn_ms, 1001);
        // Only one per interval, no batching after a long gap
        assert!(spawner.update(1500, Vec2::ZERO, &mut rng, &tuning).is_none());
        assert!(spawner.update(9000, Vec2::ZERO, &mut rng, &tuning).is_some());
        assert!(spawner.update(9001, Vec2::ZERO, &mut rng, &tuning).is_none());
    }

    #[test]
    fn test_spawn_on_ring() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(&tuning, 0);
        let mut rng = Pcg32::seed_from_u64(11);
        let center = Vec2::new(400.0, 300.0);

        for i in 1..=50 {
            let enemy = spawner
                .update(i * 2000, center, &mut rng, &tuning)
                .unwrap();
            assert!((enemy.pos.distance(center) - 800.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let tuning = Tuning::default();
        let run = |seed| {
            let mut spawner = Spawner::new(&tuning, 0);
            let mut rng = Pcg32::seed_from_u64(seed);
            (1..=5)
                .filter_map(|i| spawner.update(i * 1100, Vec2::ZERO, &mut rng, &tuning))
                .map(|e| e.pos)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
        assert_eq!(run(42).len(), 5);
    }
}
