//! Pure wave scheduler: wave number in, [`WaveSpec`] out.
//!
//! No state, no side effects. Two calls with the same wave number yield
//! structurally equal specs — the encounter controller re-derives the spec
//! whenever it needs one instead of holding a mutable copy. The only
//! "random" choice (boss kind past wave 10) is drawn from an RNG seeded by
//! the wave number, so it is uniform across waves but stable per wave.

use super::types::{BossKind, EnemyKind, WaveSpec};
use crate::core::constants::*;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Seed salt for the per-wave boss roll, so the roll stream is independent
/// of any other wave-number-seeded randomness a host might add.
const BOSS_ROLL_SALT: u64 = 0x5157_4156_4f49_44;

/// Derive the full spec for a wave. Wave numbers start at 1.
pub fn wave_spec(wave_number: u32) -> WaveSpec {
    let n = wave_number.max(1);
    let is_boss = n % BOSS_WAVE_INTERVAL == 0;
    let boss_kind = if is_boss { Some(boss_kind_for(n)) } else { None };
    WaveSpec {
        wave_number: n,
        title: wave_title(n, is_boss),
        enemy_count: enemy_count(n),
        spawn_delay_ms: spawn_delay_ms(n),
        enemy_mix: enemy_mix(n),
        break_duration_ms: WAVE_BREAK_DURATION_MS,
        is_boss,
        boss_kind,
    }
}

/// Enemies fielded on wave `n`, capped at the ceiling.
pub fn enemy_count(n: u32) -> u32 {
    (WAVE_BASE_ENEMY_COUNT + WAVE_ENEMIES_PER_WAVE * n).min(WAVE_MAX_ENEMY_COUNT)
}

/// Milliseconds between spawns on wave `n`, floored at the minimum.
pub fn spawn_delay_ms(n: u32) -> u32 {
    WAVE_BASE_SPAWN_DELAY_MS
        .saturating_sub(WAVE_SPAWN_DELAY_STEP_MS * n)
        .max(WAVE_MIN_SPAWN_DELAY_MS)
}

/// Enemy mix for wave `n`: linear drift from the base percentages, clamped
/// at each kind's bound, then normalized so the probabilities sum to 1.
///
/// The normalization is what keeps this a valid distribution once the
/// linear terms saturate at different waves — without it the raw values
/// only sum to 1 while no clamp has kicked in.
pub fn enemy_mix(n: u32) -> Vec<(EnemyKind, f64)> {
    let drift = n.saturating_sub(1) as f64;
    let chaser = (CHASER_BASE_PCT + CHASER_DRIFT_PER_WAVE * drift).max(CHASER_MIN_PCT);
    let striker = (STRIKER_BASE_PCT + STRIKER_DRIFT_PER_WAVE * drift).min(STRIKER_MAX_PCT);
    let splitter = (SPLITTER_BASE_PCT + SPLITTER_DRIFT_PER_WAVE * drift).min(SPLITTER_MAX_PCT);

    let total = chaser + striker + splitter;
    vec![
        (EnemyKind::Chaser, chaser / total),
        (EnemyKind::Striker, striker / total),
        (EnemyKind::Splitter, splitter / total),
    ]
}

/// Boss kind cadence: wave 5 introduces the Sentinel, wave 10 the Ravager,
/// later boss waves draw uniformly between the two.
fn boss_kind_for(n: u32) -> BossKind {
    match n {
        5 => BossKind::Sentinel,
        10 => BossKind::Ravager,
        n if n > 10 => {
            let mut rng = Pcg32::seed_from_u64(BOSS_ROLL_SALT ^ n as u64);
            if rng.gen_bool(0.5) {
                BossKind::Sentinel
            } else {
                BossKind::Ravager
            }
        }
        // Unreachable with the current cadence; kept so a cadence change
        // cannot leave a boss wave without a kind.
        n => {
            if n % 10 == 0 {
                BossKind::Ravager
            } else {
                BossKind::Sentinel
            }
        }
    }
}

fn wave_title(n: u32, is_boss: bool) -> String {
    if is_boss {
        format!("BOSS {}", (n + BOSS_WAVE_INTERVAL - 1) / BOSS_WAVE_INTERVAL)
    } else {
        format!("Wave {}", n)
    }
}
