//! Progression persistence: local JSON cache and legacy-save migration.

use super::types::{ProgressionState, SkillNodeId, STATE_VERSION};
use crate::utils::persistence::{load_json, save_json};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

pub const PROGRESSION_FILE: &str = "progression.json";
pub const LEGACY_UPGRADES_FILE: &str = "upgrades.json";

/// Load the local progression cache, or a fresh default if the file is
/// missing, malformed, or from a different schema version.
pub fn load_progression(dir: &Path) -> ProgressionState {
    match load_json::<ProgressionState>(&dir.join(PROGRESSION_FILE)) {
        Some(state) if state.version == STATE_VERSION => state,
        _ => ProgressionState::default(),
    }
}

/// Save the local progression cache.
pub fn save_progression(dir: &Path, state: &ProgressionState) -> io::Result<()> {
    save_json(&dir.join(PROGRESSION_FILE), state)
}

/// Pre-graph flat upgrade record (schema version 1). Kept only to migrate
/// old installs; never written anymore.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyUpgrades {
    #[serde(default)]
    pub damage_level: u8,
    #[serde(default)]
    pub fire_rate_level: u8,
    #[serde(default)]
    pub armor_level: u8,
    #[serde(default)]
    pub speed_level: u8,
    #[serde(default)]
    pub points_spent: u32,
}

/// Load a legacy flat record if one exists.
pub fn load_legacy_upgrades(dir: &Path) -> Option<LegacyUpgrades> {
    load_json(&dir.join(LEGACY_UPGRADES_FILE))
}

/// One-time best-effort mapping of flat upgrade levels onto graph nodes.
/// Levels past a node's rank cap are dropped rather than spilled elsewhere.
pub fn migrate_legacy_upgrades(legacy: &LegacyUpgrades, now_ms: i64) -> ProgressionState {
    let mut state = ProgressionState {
        version: STATE_VERSION,
        total_spent: legacy.points_spent,
        updated_at: now_ms,
        ..ProgressionState::default()
    };

    let mapping = [
        (SkillNodeId::HollowPoint, legacy.damage_level),
        (SkillNodeId::RapidFire, legacy.fire_rate_level),
        (SkillNodeId::Plating, legacy.armor_level),
        (SkillNodeId::Sprinter, legacy.speed_level),
    ];
    for (node, level) in mapping {
        if level > 0 {
            state.unlocked.insert(node, level.min(node.max_rank()));
        }
    }
    state
}
