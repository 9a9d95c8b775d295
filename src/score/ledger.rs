//! Idempotent score ledger and the score formula.

use super::persistence::{load_scores, save_scores};
use super::types::{WaveScoreEntry, WaveStats};
use crate::core::constants::{
    BOSS_SCORE_BASE, BOSS_SCORE_PER_WAVE, EXPECTED_SECS_PER_ENEMY, KILL_BONUS_RATE,
    REGULAR_SCORE_BASE, REGULAR_SCORE_PER_WAVE, SPEED_BONUS_RATE,
};
use crate::remote::RemoteStore;
use crate::utils::persistence::data_dir;
use crate::waves::BossKind;
use log::warn;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

/// Base score for a regular wave: `50 + 25·n`.
pub fn regular_base_score(wave_number: u32) -> u32 {
    REGULAR_SCORE_BASE + REGULAR_SCORE_PER_WAVE * wave_number
}

/// Boss wave score: `floor(200 + 50·n·mult)`, `mult` from the boss kind.
pub fn boss_wave_score(wave_number: u32, boss_kind: Option<BossKind>) -> u32 {
    let mult = boss_kind.map_or(1.0, |kind| kind.score_multiplier());
    (BOSS_SCORE_BASE + BOSS_SCORE_PER_WAVE * wave_number as f64 * mult).floor() as u32
}

/// Regular wave score: base plus the efficiency bonuses.
///
/// Kill bonus pays 20% of base for a 100% kill ratio, nothing otherwise.
/// Speed bonus pays up to 15% of base scaled by the fraction of the expected
/// clear time (2 s per spawned enemy) that was saved.
pub fn regular_wave_score(wave_number: u32, stats: &WaveStats) -> u32 {
    let base = regular_base_score(wave_number);

    let kill_bonus = if stats.full_clear() {
        (base as f64 * KILL_BONUS_RATE) as u32
    } else {
        0
    };

    let expected = EXPECTED_SECS_PER_ENEMY * stats.spawned as f64;
    let speed_bonus = if expected > 0.0 {
        let saved = ((expected - stats.clear_time_secs) / expected).max(0.0);
        (base as f64 * SPEED_BONUS_RATE * saved).floor() as u32
    } else {
        0
    };

    base + kill_bonus + speed_bonus
}

/// Full formula dispatch.
pub fn wave_score(
    wave_number: u32,
    is_boss: bool,
    boss_kind: Option<BossKind>,
    stats: &WaveStats,
) -> u32 {
    if is_boss {
        boss_wave_score(wave_number, boss_kind)
    } else {
        regular_wave_score(wave_number, stats)
    }
}

/// Append-only map of wave number to recorded score.
///
/// Client-authoritative: entries are written locally on every completion and
/// mirrored to the remote store when one is configured and reachable.
pub struct ScoreLedger {
    device_id: String,
    save_dir: Option<PathBuf>,
    remote: Option<Rc<dyn RemoteStore>>,
    entries: BTreeMap<u32, WaveScoreEntry>,
}

impl ScoreLedger {
    /// Build an empty ledger. `save_dir: None` keeps it memory-only.
    pub fn new(
        device_id: impl Into<String>,
        save_dir: Option<PathBuf>,
        remote: Option<Rc<dyn RemoteStore>>,
    ) -> Self {
        ScoreLedger {
            device_id: device_id.into(),
            save_dir,
            remote,
            entries: BTreeMap::new(),
        }
    }

    /// Build a ledger over the default per-device directory and hydrate it.
    pub fn open(device_id: &str, remote: Option<Rc<dyn RemoteStore>>) -> Self {
        let save_dir = match data_dir(device_id) {
            Ok(dir) => Some(dir),
            Err(e) => {
                warn!("score cache dir unavailable: {}", e);
                None
            }
        };
        let mut ledger = ScoreLedger::new(device_id, save_dir, remote);
        ledger.hydrate();
        ledger
    }

    /// Adopt the remote snapshot when available, else the local one.
    pub fn hydrate(&mut self) {
        if let Some(remote) = &self.remote {
            if let Some(entries) = remote.fetch_scores(&self.device_id) {
                self.entries = entries
                    .into_iter()
                    .map(|entry| (entry.wave_number, entry))
                    .collect();
                self.persist_local();
                return;
            }
        }
        if let Some(dir) = &self.save_dir {
            self.entries = load_scores(dir);
        }
    }

    /// Record a wave completion exactly once.
    ///
    /// Returns `false` without mutating anything when the wave is already
    /// recorded. Otherwise stores `max(proposed_score, formula score)`,
    /// pushes to the remote best-effort, and records locally regardless of
    /// the push outcome — the write is never lost client-side, only the
    /// remote mirror may lag.
    pub fn complete_wave(
        &mut self,
        wave_number: u32,
        proposed_score: u32,
        is_boss: bool,
        boss_kind: Option<BossKind>,
        stats: &WaveStats,
        now_ms: i64,
    ) -> bool {
        if self.entries.contains_key(&wave_number) {
            return false;
        }

        let score = proposed_score.max(wave_score(wave_number, is_boss, boss_kind, stats));
        let entry = WaveScoreEntry {
            wave_number,
            score,
            completed_at: now_ms,
            is_boss,
            boss_kind,
        };

        if let Some(remote) = &self.remote {
            let _ = remote.push_score(&self.device_id, &entry);
        }

        self.entries.insert(wave_number, entry);
        self.persist_local();
        true
    }

    pub fn total_score(&self) -> u64 {
        self.entries.values().map(|entry| entry.score as u64).sum()
    }

    pub fn entry(&self, wave_number: u32) -> Option<&WaveScoreEntry> {
        self.entries.get(&wave_number)
    }

    pub fn entries(&self) -> impl Iterator<Item = &WaveScoreEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full reset. When a remote store is configured its reset must succeed
    /// first; the local clear happens last so a failed remote reset cannot
    /// desync the two sides. Returns whether the reset happened.
    pub fn reset_progress(&mut self) -> bool {
        if let Some(remote) = &self.remote {
            if !remote.reset_scores(&self.device_id) {
                warn!("remote score reset failed; keeping local ledger");
                return false;
            }
        }
        self.entries.clear();
        self.persist_local();
        true
    }

    fn persist_local(&self) {
        if let Some(dir) = &self.save_dir {
            if let Err(e) = save_scores(dir, &self.entries) {
                warn!("score cache write failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_stats(spawned: u32, clear_time_secs: f64) -> WaveStats {
        WaveStats {
            spawned,
            killed: spawned,
            clear_time_secs,
        }
    }

    fn memory_ledger() -> ScoreLedger {
        ScoreLedger::new("test-device", None, None)
    }

    #[test]
    fn test_regular_base_formula() {
        assert_eq!(regular_base_score(1), 75);
        assert_eq!(regular_base_score(4), 150);
    }

    #[test]
    fn test_boss_formula() {
        // Wave 5, Sentinel: floor(200 + 50*5*1.0)
        assert_eq!(boss_wave_score(5, Some(BossKind::Sentinel)), 450);
        // Wave 10, Ravager: floor(200 + 50*10*1.4)
        assert_eq!(boss_wave_score(10, Some(BossKind::Ravager)), 900);
        // Missing kind falls back to the 1.0 multiplier.
        assert_eq!(boss_wave_score(5, None), 450);
    }

    #[test]
    fn test_kill_bonus_requires_full_clear() {
        let full = regular_wave_score(1, &clear_stats(11, 22.0));
        let partial = regular_wave_score(
            1,
            &WaveStats {
                spawned: 11,
                killed: 10,
                clear_time_secs: 22.0,
            },
        );
        // Base 75, full-clear bonus 15, no speed bonus at exactly expected time.
        assert_eq!(full, 90);
        assert_eq!(partial, 75);
    }

    #[test]
    fn test_speed_bonus_scales_with_time_saved() {
        // Expected 22s for 11 spawns; clearing in 11s saves half.
        let fast = regular_wave_score(1, &clear_stats(11, 11.0));
        // floor(75 * 0.15 * 0.5) = 5, plus base 75 and kill bonus 15.
        assert_eq!(fast, 95);

        // Slower than expected earns nothing extra.
        let slow = regular_wave_score(1, &clear_stats(11, 60.0));
        assert_eq!(slow, 90);
    }

    #[test]
    fn test_complete_wave_is_idempotent() {
        let mut ledger = memory_ledger();
        let stats = clear_stats(11, 20.0);

        assert!(ledger.complete_wave(1, 0, false, None, &stats, 100));
        assert!(!ledger.complete_wave(1, 9999, false, None, &stats, 200));

        assert_eq!(ledger.len(), 1);
        let entry = ledger.entry(1).unwrap();
        assert_eq!(entry.completed_at, 100);
        // Second call changed nothing, including the score.
        assert!(entry.score < 9999);
    }

    #[test]
    fn test_total_reflects_each_wave_once() {
        let mut ledger = memory_ledger();
        let stats = clear_stats(11, 22.0);
        ledger.complete_wave(1, 0, false, None, &stats, 1);
        ledger.complete_wave(1, 0, false, None, &stats, 2);
        ledger.complete_wave(2, 0, false, None, &clear_stats(14, 28.0), 3);

        let expected =
            regular_wave_score(1, &stats) as u64 + regular_wave_score(2, &clear_stats(14, 28.0)) as u64;
        assert_eq!(ledger.total_score(), expected);
    }

    #[test]
    fn test_proposed_score_wins_when_higher() {
        let mut ledger = memory_ledger();
        let stats = clear_stats(11, 22.0);
        ledger.complete_wave(1, 50_000, false, None, &stats, 1);
        assert_eq!(ledger.entry(1).unwrap().score, 50_000);

        // A lowball proposal is raised to the formula floor.
        ledger.complete_wave(2, 1, false, None, &clear_stats(14, 28.0), 2);
        assert_eq!(
            ledger.entry(2).unwrap().score,
            regular_wave_score(2, &clear_stats(14, 28.0))
        );
    }

    #[test]
    fn test_boss_entries_carry_their_kind() {
        let mut ledger = memory_ledger();
        ledger.complete_wave(
            10,
            0,
            true,
            Some(BossKind::Ravager),
            &WaveStats::default(),
            1,
        );
        let entry = ledger.entry(10).unwrap();
        assert!(entry.is_boss);
        assert_eq!(entry.boss_kind, Some(BossKind::Ravager));
        assert_eq!(entry.score, 900);
    }

    #[test]
    fn test_reset_clears_without_remote() {
        let mut ledger = memory_ledger();
        ledger.complete_wave(1, 0, false, None, &clear_stats(11, 22.0), 1);
        assert!(ledger.reset_progress());
        assert!(ledger.is_empty());
        assert_eq!(ledger.total_score(), 0);
    }
}
