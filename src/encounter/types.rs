//! Encounter state types and the events handed to the presentation layer.

use crate::core::constants::{
    ARENA_HALF_EXTENT, BOSS_COUNTDOWN_SECS, BOSS_HIT_DEBOUNCE_SECS, BOSS_INTRO_SECS,
    MIN_OBSTACLE_SEPARATION, MIN_PLAYER_DISTANCE, OBSTACLE_MAX_HP, PLACEMENT_MAX_ATTEMPTS,
    WAVE_CLEARED_LINGER_SECS,
};
use crate::waves::{BossKind, EnemyKind};
use glam::Vec2;

/// Encounter lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Intro,
    Countdown,
    InCombat,
    Cleared,
    Break,
}

/// Who fired a projectile. Drives the asymmetric obstacle collision rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileSource {
    Player,
    Boss,
}

/// Live boss health pool. Defeated at hp <= 0.
#[derive(Debug, Clone, PartialEq)]
pub struct BossState {
    pub id: u32,
    pub kind: BossKind,
    pub hp: i32,
    pub max_hp: i32,
    pub pos: Vec2,
}

impl BossState {
    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    pub fn health_pct(&self) -> f32 {
        if self.max_hp <= 0 {
            0.0
        } else {
            (self.hp.max(0) as f32 / self.max_hp as f32).clamp(0.0, 1.0)
        }
    }
}

/// Destructible pillar spawned for boss encounters. Destruction is one-way:
/// a broken pillar is never re-created within the same encounter.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub hp: u32,
    pub destroyed: bool,
}

impl Obstacle {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Obstacle {
            id,
            pos,
            hp: OBSTACLE_MAX_HP,
            destroyed: false,
        }
    }

    /// Pillars are player-side cover only: they stop the player's bullets
    /// (and movement) but never boss-fired projectiles.
    pub fn blocks(&self, source: ProjectileSource) -> bool {
        !self.destroyed && source == ProjectileSource::Player
    }
}

/// Tunables for one controller instance. Defaults come from the balance
/// constants; the debounce window is deliberately configurable rather than
/// tied to any one render rate.
#[derive(Debug, Clone)]
pub struct EncounterConfig {
    pub intro_secs: f64,
    pub countdown_secs: f64,
    pub cleared_linger_secs: f64,
    pub boss_hit_debounce_secs: f64,
    pub arena_half_extent: f32,
    pub min_player_distance: f32,
    pub min_obstacle_separation: f32,
    pub placement_attempts: u32,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        EncounterConfig {
            intro_secs: BOSS_INTRO_SECS,
            countdown_secs: BOSS_COUNTDOWN_SECS,
            cleared_linger_secs: WAVE_CLEARED_LINGER_SECS,
            boss_hit_debounce_secs: BOSS_HIT_DEBOUNCE_SECS,
            arena_half_extent: ARENA_HALF_EXTENT,
            min_player_distance: MIN_PLAYER_DISTANCE,
            min_obstacle_separation: MIN_OBSTACLE_SEPARATION,
            placement_attempts: PLACEMENT_MAX_ATTEMPTS,
        }
    }
}

/// Effects emitted by the controller for the host engine to act on.
/// The controller never touches rendering or physics directly.
#[derive(Debug, Clone, PartialEq)]
pub enum EncounterEvent {
    WaveStarted {
        wave_number: u32,
        title: String,
    },
    BossIntroStarted {
        wave_number: u32,
    },
    BossCountdownStarted {
        wave_number: u32,
    },
    SpawnEnemy {
        kind: EnemyKind,
        pos: Vec2,
    },
    BossSpawned {
        id: u32,
        kind: BossKind,
        pos: Vec2,
        max_hp: i32,
    },
    ObstacleSpawned {
        id: u32,
        pos: Vec2,
    },
    ObstacleDestroyed {
        id: u32,
    },
    BossDamaged {
        id: u32,
        hp: i32,
        max_hp: i32,
    },
    BossDefeated {
        id: u32,
        kind: BossKind,
    },
    WaveCompleted {
        wave_number: u32,
        /// Whether the ledger accepted the entry (false on idempotent replay).
        recorded: bool,
    },
    BreakStarted {
        duration_ms: u32,
    },
}

/// Read-only snapshot for the HUD.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveHudState {
    pub wave_number: u32,
    pub title: String,
    pub phase: Phase,
    /// One entry per live boss, in spawn order.
    pub boss_health_pct: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_blocks_only_player_fire() {
        let obstacle = Obstacle::new(1, Vec2::ZERO);
        assert!(obstacle.blocks(ProjectileSource::Player));
        assert!(!obstacle.blocks(ProjectileSource::Boss));
    }

    #[test]
    fn test_destroyed_obstacle_blocks_nothing() {
        let mut obstacle = Obstacle::new(1, Vec2::ZERO);
        obstacle.hp = 0;
        obstacle.destroyed = true;
        assert!(!obstacle.blocks(ProjectileSource::Player));
        assert!(!obstacle.blocks(ProjectileSource::Boss));
    }

    #[test]
    fn test_boss_health_pct_clamps() {
        let mut boss = BossState {
            id: 1,
            kind: BossKind::Sentinel,
            hp: 50,
            max_hp: 100,
            pos: Vec2::ZERO,
        };
        assert_eq!(boss.health_pct(), 0.5);
        boss.hp = -20;
        assert_eq!(boss.health_pct(), 0.0);
        assert!(boss.is_defeated());
    }
}
