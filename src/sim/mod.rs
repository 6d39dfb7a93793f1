//! Simulation core
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - Wall-clock time and frame delta arrive through `TickInput`
//! - Seeded RNG only
//! - Stable iteration order (insertion order of enemies and projectiles)

pub mod camera;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod upgrade;

pub use camera::Camera;
pub use collision::{CombatReport, advance_projectiles, resolve_combat};
pub use spawn::Spawner;
pub use state::{Enemy, GamePhase, GameState, Player, Projectile, UpgradeKind, Upgrades};
pub use tick::{MoveKeys, TickInput, tick};
pub use upgrade::{UpgradeMenu, UpgradeOption};
