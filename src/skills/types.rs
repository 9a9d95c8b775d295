//! Skill node catalog and progression state.
//!
//! Nodes are authored data: the enum carries the whole table (specialization,
//! rank caps, cost curve, prerequisite edges, per-rank effects) in `match`
//! form. Only the unlocked ranks in [`ProgressionState`] are persisted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Current on-disk/remote schema version for [`ProgressionState`].
/// Version 1 was the pre-graph flat upgrade-level record.
pub const STATE_VERSION: u32 = 2;

/// Skill tree branch a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specialization {
    Basic,
    Special,
    Defense,
}

/// Node identifiers in the skill graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillNodeId {
    // Basic (offense)
    RapidFire,
    HollowPoint,
    VelocityRounds,
    TwinBarrel,
    Overcharge,
    // Special
    LuckyShot,
    Magnet,
    PetDrone,
    // Defense
    Plating,
    Sprinter,
    Aegis,
    Bulwark,
    ShieldAfterIdle,
}

impl SkillNodeId {
    /// All nodes in catalog order.
    pub const ALL: [SkillNodeId; 13] = [
        SkillNodeId::RapidFire,
        SkillNodeId::HollowPoint,
        SkillNodeId::VelocityRounds,
        SkillNodeId::TwinBarrel,
        SkillNodeId::Overcharge,
        SkillNodeId::LuckyShot,
        SkillNodeId::Magnet,
        SkillNodeId::PetDrone,
        SkillNodeId::Plating,
        SkillNodeId::Sprinter,
        SkillNodeId::Aegis,
        SkillNodeId::Bulwark,
        SkillNodeId::ShieldAfterIdle,
    ];

    /// Display name for the HUD/shop.
    pub fn name(&self) -> &'static str {
        match self {
            SkillNodeId::RapidFire => "Rapid Fire",
            SkillNodeId::HollowPoint => "Hollow Point",
            SkillNodeId::VelocityRounds => "Velocity Rounds",
            SkillNodeId::TwinBarrel => "Twin Barrel",
            SkillNodeId::Overcharge => "Overcharge",
            SkillNodeId::LuckyShot => "Lucky Shot",
            SkillNodeId::Magnet => "Magnet",
            SkillNodeId::PetDrone => "Pet Drone",
            SkillNodeId::Plating => "Plating",
            SkillNodeId::Sprinter => "Sprinter",
            SkillNodeId::Aegis => "Aegis",
            SkillNodeId::Bulwark => "Bulwark",
            SkillNodeId::ShieldAfterIdle => "Idle Shield",
        }
    }

    pub fn specialization(&self) -> Specialization {
        match self {
            SkillNodeId::RapidFire
            | SkillNodeId::HollowPoint
            | SkillNodeId::VelocityRounds
            | SkillNodeId::TwinBarrel
            | SkillNodeId::Overcharge => Specialization::Basic,
            SkillNodeId::LuckyShot | SkillNodeId::Magnet | SkillNodeId::PetDrone => {
                Specialization::Special
            }
            SkillNodeId::Plating
            | SkillNodeId::Sprinter
            | SkillNodeId::Aegis
            | SkillNodeId::Bulwark
            | SkillNodeId::ShieldAfterIdle => Specialization::Defense,
        }
    }

    /// How many times the node can be purchased.
    pub fn max_rank(&self) -> u8 {
        match self {
            SkillNodeId::RapidFire | SkillNodeId::HollowPoint => 5,
            SkillNodeId::VelocityRounds | SkillNodeId::Overcharge => 3,
            SkillNodeId::TwinBarrel => 2,
            SkillNodeId::LuckyShot => 5,
            SkillNodeId::Magnet => 3,
            SkillNodeId::PetDrone => 1,
            SkillNodeId::Plating => 5,
            SkillNodeId::Sprinter => 4,
            SkillNodeId::Aegis => 4,
            SkillNodeId::Bulwark => 3,
            SkillNodeId::ShieldAfterIdle => 1,
        }
    }

    pub fn base_cost(&self) -> f64 {
        match self {
            SkillNodeId::RapidFire => 100.0,
            SkillNodeId::HollowPoint => 150.0,
            SkillNodeId::VelocityRounds => 120.0,
            SkillNodeId::TwinBarrel => 600.0,
            SkillNodeId::Overcharge => 400.0,
            SkillNodeId::LuckyShot => 100.0,
            SkillNodeId::Magnet => 80.0,
            SkillNodeId::PetDrone => 800.0,
            SkillNodeId::Plating => 100.0,
            SkillNodeId::Sprinter => 90.0,
            SkillNodeId::Aegis => 250.0,
            SkillNodeId::Bulwark => 500.0,
            SkillNodeId::ShieldAfterIdle => 700.0,
        }
    }

    pub fn cost_scale(&self) -> f64 {
        match self {
            SkillNodeId::RapidFire | SkillNodeId::HollowPoint | SkillNodeId::LuckyShot => 1.5,
            SkillNodeId::VelocityRounds | SkillNodeId::Magnet | SkillNodeId::Sprinter => 1.4,
            SkillNodeId::Overcharge | SkillNodeId::Bulwark => 1.8,
            SkillNodeId::Aegis => 1.6,
            SkillNodeId::TwinBarrel | SkillNodeId::PetDrone | SkillNodeId::ShieldAfterIdle => 2.0,
            SkillNodeId::Plating => 1.5,
        }
    }

    /// Points to go from `current_rank` to `current_rank + 1`:
    /// `floor(base_cost * cost_scale^current_rank)`.
    pub fn cost_at(&self, current_rank: u8) -> u32 {
        (self.base_cost() * self.cost_scale().powi(current_rank as i32)).floor() as u32
    }

    /// Prerequisite edges: each entry is a node that must be at least at the
    /// given rank before this node can be purchased at all.
    pub fn prerequisites(&self) -> &'static [(SkillNodeId, u8)] {
        match self {
            SkillNodeId::VelocityRounds => &[(SkillNodeId::RapidFire, 1)],
            SkillNodeId::TwinBarrel => &[(SkillNodeId::RapidFire, 3)],
            SkillNodeId::Overcharge => &[(SkillNodeId::HollowPoint, 3)],
            SkillNodeId::PetDrone => &[(SkillNodeId::LuckyShot, 2)],
            SkillNodeId::Aegis => &[(SkillNodeId::Plating, 2)],
            SkillNodeId::Bulwark => &[(SkillNodeId::Aegis, 2)],
            SkillNodeId::ShieldAfterIdle => &[(SkillNodeId::Plating, 3)],
            _ => &[],
        }
    }

    /// Total effect contributed by this node at the given rank.
    pub fn effect(&self, rank: u8) -> NodeEffect {
        let mut effect = NodeEffect::default();
        if rank == 0 {
            return effect;
        }
        let r = rank.min(self.max_rank()) as f64;
        match self {
            SkillNodeId::RapidFire => effect.stats.fire_rate_pct = 8.0 * r,
            SkillNodeId::HollowPoint => effect.stats.damage = 2.0 * r,
            SkillNodeId::VelocityRounds => effect.stats.bullet_speed_pct = 10.0 * r,
            SkillNodeId::TwinBarrel => effect.modifiers.extra_projectiles = r,
            SkillNodeId::Overcharge => effect.stats.damage = 5.0 * r,
            SkillNodeId::LuckyShot => effect.modifiers.crit_chance_pct = 3.0 * r,
            SkillNodeId::Magnet => effect.modifiers.pickup_radius_pct = 15.0 * r,
            SkillNodeId::PetDrone => effect.modifiers.pet_drone = true,
            SkillNodeId::Plating => effect.stats.max_hp = 20.0 * r,
            SkillNodeId::Sprinter => effect.stats.move_speed_pct = 5.0 * r,
            SkillNodeId::Aegis => effect.modifiers.damage_reduction_pct = 0.15 * r,
            SkillNodeId::Bulwark => effect.modifiers.damage_reduction_pct = 0.10 * r,
            SkillNodeId::ShieldAfterIdle => effect.modifiers.shield_after_idle = true,
        }
        effect
    }
}

/// Additive stat deltas applied at entity-creation time.
///
/// Percent fields are percentage points (`8.0` = +8%).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatBonuses {
    pub damage: f64,
    pub fire_rate_pct: f64,
    pub bullet_speed_pct: f64,
    pub move_speed_pct: f64,
    pub max_hp: f64,
}

impl StatBonuses {
    pub fn add(&mut self, other: &StatBonuses) {
        self.damage += other.damage;
        self.fire_rate_pct += other.fire_rate_pct;
        self.bullet_speed_pct += other.bullet_speed_pct;
        self.move_speed_pct += other.move_speed_pct;
        self.max_hp += other.max_hp;
    }
}

/// Non-linear or flag-like gameplay effects.
///
/// Numeric fields are additive across nodes; boolean flags are OR'd.
/// `damage_reduction_pct` is a fraction of incoming damage and is clamped to
/// the design cap after summation, not per node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Modifiers {
    pub damage_reduction_pct: f64,
    pub crit_chance_pct: f64,
    pub pickup_radius_pct: f64,
    pub extra_projectiles: f64,
    pub pet_drone: bool,
    pub shield_after_idle: bool,
}

impl Modifiers {
    pub fn add(&mut self, other: &Modifiers) {
        self.damage_reduction_pct += other.damage_reduction_pct;
        self.crit_chance_pct += other.crit_chance_pct;
        self.pickup_radius_pct += other.pickup_radius_pct;
        self.extra_projectiles += other.extra_projectiles;
        self.pet_drone |= other.pet_drone;
        self.shield_after_idle |= other.shield_after_idle;
    }
}

/// Combined per-node contribution.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeEffect {
    pub stats: StatBonuses,
    pub modifiers: Modifiers,
}

/// Persisted progression: unlocked ranks plus merge bookkeeping.
///
/// Mutated only through `ProgressionStore::purchase`; merged with the remote
/// copy by comparing `updated_at` (higher wins, ties keep local).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub version: u32,
    pub unlocked: HashMap<SkillNodeId, u8>,
    pub total_spent: u32,
    pub updated_at: i64,
}

impl Default for ProgressionState {
    fn default() -> Self {
        ProgressionState {
            version: STATE_VERSION,
            unlocked: HashMap::new(),
            total_spent: 0,
            updated_at: 0,
        }
    }
}

impl ProgressionState {
    pub fn rank(&self, node: SkillNodeId) -> u8 {
        *self.unlocked.get(&node).unwrap_or(&0)
    }

    /// True when no node has been purchased. Gates legacy migration.
    pub fn is_empty(&self) -> bool {
        self.unlocked.values().all(|&rank| rank == 0)
    }
}

/// Synchronous purchase rejection. Signaled as a value, never a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("node is already at max rank {max_rank}")]
    MaxRank { max_rank: u8 },
    #[error("requires prerequisite at rank {required}, have {have}")]
    PrerequisiteUnmet {
        prerequisite: SkillNodeId,
        required: u8,
        have: u8,
    },
    #[error("costs {cost} points, only {available} available")]
    InsufficientPoints { cost: u32, available: u32 },
}
