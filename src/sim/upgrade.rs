//! Upgrade offer shown when the score crosses a threshold

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{UpgradeKind, Upgrades};
use crate::Rect;
use crate::tuning::Tuning;

/// Number of options offered at once
pub const UPGRADE_CHOICES: usize = 3;

/// Menu layout (screen pixels)
pub const MENU_TITLE: &str = "Choose an Upgrade!";
pub const MENU_TITLE_Y: f32 = 100.0;
const OPTION_TOP: f32 = 250.0;
const OPTION_STRIDE: f32 = 100.0;
const OPTION_HEIGHT: f32 = 60.0;

/// One selectable upgrade
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeOption {
    pub kind: UpgradeKind,
    /// Level the player will have after picking it
    pub next_level: u32,
    /// Click target
    pub rect: Rect,
}

impl UpgradeOption {
    pub fn label(&self) -> String {
        format!("{} (Level {})", self.kind.label(), self.next_level)
    }
}

/// Options sampled without replacement from the upgrade kinds
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeMenu {
    pub options: Vec<UpgradeOption>,
}

impl UpgradeMenu {
    pub fn offer(rng: &mut impl Rng, upgrades: &Upgrades, tuning: &Tuning) -> Self {
        let kinds: Vec<UpgradeKind> = UpgradeKind::ALL
            .choose_multiple(rng, UPGRADE_CHOICES)
            .copied()
            .collect();
        Self::with_kinds(&kinds, upgrades, tuning)
    }

    /// Lay out a menu for the given kinds, top to bottom
    pub fn with_kinds(kinds: &[UpgradeKind], upgrades: &Upgrades, tuning: &Tuning) -> Self {
        let options = kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| UpgradeOption {
                kind,
                next_level: upgrades.level(kind) + 1,
                rect: option_rect(i, tuning.screen_width),
            })
            .collect();
        Self { options }
    }

    /// The option under a screen-space point, if any
    pub fn hit_test(&self, point: Vec2) -> Option<UpgradeKind> {
        self.options
            .iter()
            .find(|opt| opt.rect.contains(point))
            .map(|opt| opt.kind)
    }

    pub fn describe(&self) -> String {
        self.options
            .iter()
            .map(UpgradeOption::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Centered button for option `index`
pub fn option_rect(index: usize, screen_width: f32) -> Rect {
    Rect::new(
        (screen_width / 4.0).floor(),
        OPTION_TOP + OPTION_STRIDE * index as f32,
        (screen_width / 2.0).floor(),
        OPTION_HEIGHT,
    )
}
