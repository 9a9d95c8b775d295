//! Wave value types: enemy/boss kinds, the per-wave spec, live counters.

use crate::core::constants::{
    RAVAGER_BASE_HP, RAVAGER_HP_PER_WAVE, RAVAGER_SCORE_MULT, RUSH_MIN_WAVE, SENTINEL_BASE_HP,
    SENTINEL_HP_PER_WAVE,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Regular enemy archetypes. A closed set — behavior lives behind the tag,
/// not behind open-ended subclassing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Rushes the player in a straight line.
    Chaser,
    /// Strafes at range and shoots.
    Striker,
    /// Splits into two smaller chasers on death.
    Splitter,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Chaser, EnemyKind::Striker, EnemyKind::Splitter];

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Chaser => "Chaser",
            EnemyKind::Striker => "Striker",
            EnemyKind::Splitter => "Splitter",
        }
    }
}

/// Boss archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossKind {
    /// Type A: slow tank, aimed volleys.
    Sentinel,
    /// Type B: fast orbiter, radial bursts.
    Ravager,
}

impl BossKind {
    pub fn name(&self) -> &'static str {
        match self {
            BossKind::Sentinel => "Sentinel",
            BossKind::Ravager => "Ravager",
        }
    }

    /// Health pool for this boss on a given wave.
    pub fn max_hp(&self, wave_number: u32) -> i32 {
        let n = wave_number as i32;
        match self {
            BossKind::Sentinel => SENTINEL_BASE_HP + SENTINEL_HP_PER_WAVE * n,
            BossKind::Ravager => RAVAGER_BASE_HP + RAVAGER_HP_PER_WAVE * n,
        }
    }

    /// Score multiplier applied to the boss score formula.
    pub fn score_multiplier(&self) -> f64 {
        match self {
            BossKind::Sentinel => 1.0,
            BossKind::Ravager => RAVAGER_SCORE_MULT,
        }
    }
}

/// Everything the encounter controller needs to run one wave.
///
/// Derived deterministically from the wave number and recomputed on demand;
/// never mutated, never cached across waves.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveSpec {
    pub wave_number: u32,
    pub title: String,
    pub enemy_count: u32,
    pub spawn_delay_ms: u32,
    /// Kind probabilities, normalized to sum to 1.
    pub enemy_mix: Vec<(EnemyKind, f64)>,
    pub break_duration_ms: u32,
    pub is_boss: bool,
    pub boss_kind: Option<BossKind>,
}

impl WaveSpec {
    /// Bosses spawned by this wave: 0 for regular waves, 2 for rush waves.
    pub fn boss_count(&self) -> u32 {
        if !self.is_boss {
            0
        } else if self.wave_number >= RUSH_MIN_WAVE {
            2
        } else {
            1
        }
    }

    /// Weighted roll over the enemy mix.
    pub fn sample_kind<R: Rng>(&self, rng: &mut R) -> EnemyKind {
        let roll: f64 = rng.gen();
        let mut cumulative = 0.0;
        for &(kind, probability) in &self.enemy_mix {
            cumulative += probability;
            if roll < cumulative {
                return kind;
            }
        }
        // Float rounding can leave the cumulative sum a hair under 1.0.
        self.enemy_mix
            .last()
            .map(|&(kind, _)| kind)
            .unwrap_or(EnemyKind::Chaser)
    }
}

/// Live counters for the wave currently being fought.
///
/// Reset when a wave starts, frozen when the break starts.
/// Invariant for non-boss waves: `killed <= spawned <= enemy_count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveProgress {
    pub spawned: u32,
    pub killed: u32,
}

impl WaveProgress {
    pub fn reset(&mut self) {
        *self = WaveProgress::default();
    }

    /// True when every spawned enemy has been killed.
    pub fn full_clear(&self) -> bool {
        self.spawned > 0 && self.killed == self.spawned
    }
}
