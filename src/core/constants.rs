//! Shared balance constants for waves, encounters, scoring, and skills.
//!
//! All core balance numbers are defined here.
//! Change once, test everywhere.

// =============================================================================
// WAVE SCHEDULING
// =============================================================================

/// Enemy count at wave 0 (before the per-wave ramp).
pub const WAVE_BASE_ENEMY_COUNT: u32 = 8;

/// Additional enemies per wave.
pub const WAVE_ENEMIES_PER_WAVE: u32 = 3;

/// Enemy count ceiling per wave.
pub const WAVE_MAX_ENEMY_COUNT: u32 = 40;

/// Spawn delay at wave 0 (before the per-wave ramp).
pub const WAVE_BASE_SPAWN_DELAY_MS: u32 = 1200;

/// Spawn delay reduction per wave.
pub const WAVE_SPAWN_DELAY_STEP_MS: u32 = 80;

/// Spawn delay floor.
pub const WAVE_MIN_SPAWN_DELAY_MS: u32 = 300;

/// Break between waves.
pub const WAVE_BREAK_DURATION_MS: u32 = 5000;

/// Every Nth wave is a boss wave.
pub const BOSS_WAVE_INTERVAL: u32 = 5;

/// First wave that spawns a dual-boss "rush" encounter.
pub const RUSH_MIN_WAVE: u32 = 15;

// Enemy mix: raw percentages start at these bases, drift linearly per wave,
// clamp at the bound, then get normalized back to a probability distribution.
pub const CHASER_BASE_PCT: f64 = 0.60;
pub const CHASER_DRIFT_PER_WAVE: f64 = -0.04;
pub const CHASER_MIN_PCT: f64 = 0.20;
pub const STRIKER_BASE_PCT: f64 = 0.30;
pub const STRIKER_DRIFT_PER_WAVE: f64 = 0.02;
pub const STRIKER_MAX_PCT: f64 = 0.50;
pub const SPLITTER_BASE_PCT: f64 = 0.10;
pub const SPLITTER_DRIFT_PER_WAVE: f64 = 0.02;
pub const SPLITTER_MAX_PCT: f64 = 0.30;

// =============================================================================
// ENCOUNTER TIMING
// =============================================================================

/// Boss warning choreography window. Spawning is blocked while it runs.
pub const BOSS_INTRO_SECS: f64 = 2.5;

/// Countdown between the intro and the boss actually spawning.
pub const BOSS_COUNTDOWN_SECS: f64 = 3.0;

/// How long the cleared banner lingers before the break starts.
pub const WAVE_CLEARED_LINGER_SECS: f64 = 1.2;

/// Default debounce window for duplicate boss-hit collision callbacks.
/// A single physics step can deliver the same overlap twice; hits to the
/// same boss id inside this window collapse into one.
pub const BOSS_HIT_DEBOUNCE_SECS: f64 = 0.04;

// =============================================================================
// BOSSES & OBSTACLES
// =============================================================================

pub const SENTINEL_BASE_HP: i32 = 500;
pub const SENTINEL_HP_PER_WAVE: i32 = 45;
pub const RAVAGER_BASE_HP: i32 = 650;
pub const RAVAGER_HP_PER_WAVE: i32 = 55;

/// Player-bullet hits a pillar absorbs before breaking.
pub const OBSTACLE_MAX_HP: u32 = 4;

/// Pillars spawned per boss encounter.
pub const OBSTACLE_COUNT: usize = 2;

// =============================================================================
// PLACEMENT
// =============================================================================

/// Half-extent of the square arena in world units.
pub const ARENA_HALF_EXTENT: f32 = 360.0;

/// Minimum distance between a spawn/placement point and the player.
pub const MIN_PLAYER_DISTANCE: f32 = 140.0;

/// Minimum distance between the two obstacle pillars.
pub const MIN_OBSTACLE_SEPARATION: f32 = 120.0;

/// Placement retries before falling back to the last candidate.
pub const PLACEMENT_MAX_ATTEMPTS: u32 = 12;

// =============================================================================
// SCORING
// =============================================================================

pub const REGULAR_SCORE_BASE: u32 = 50;
pub const REGULAR_SCORE_PER_WAVE: u32 = 25;
pub const BOSS_SCORE_BASE: f64 = 200.0;
pub const BOSS_SCORE_PER_WAVE: f64 = 50.0;

/// Score multiplier for Ravager (type B) kills.
pub const RAVAGER_SCORE_MULT: f64 = 1.4;

/// Full-clear bonus: base score fraction awarded at a 100% kill ratio.
pub const KILL_BONUS_RATE: f64 = 0.2;

/// Speed bonus: base score fraction scaled by time saved vs. expected.
pub const SPEED_BONUS_RATE: f64 = 0.15;

/// Expected clear time budget per spawned enemy, in seconds.
pub const EXPECTED_SECS_PER_ENEMY: f64 = 2.0;

// =============================================================================
// SKILLS
// =============================================================================

/// Hard cap on aggregated damage reduction, regardless of node stacking.
pub const DAMAGE_REDUCTION_CAP: f64 = 0.8;

// =============================================================================
// REMOTE SYNC
// =============================================================================

/// Per-call timeout for best-effort remote reads/writes.
pub const REMOTE_TIMEOUT_SECS: u64 = 2;

pub const REMOTE_USER_AGENT: &str = "voidstorm-sync";
