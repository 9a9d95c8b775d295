//! Score ledger value types.

use crate::waves::BossKind;
use serde::{Deserialize, Serialize};

/// One recorded wave completion. Append-only: a wave number appears at most
/// once for the lifetime of a run/session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveScoreEntry {
    pub wave_number: u32,
    pub score: u32,
    /// Unix milliseconds.
    pub completed_at: i64,
    pub is_boss: bool,
    pub boss_kind: Option<BossKind>,
}

/// Completion measurements feeding the efficiency bonuses.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaveStats {
    pub spawned: u32,
    pub killed: u32,
    pub clear_time_secs: f64,
}

impl WaveStats {
    /// True when every spawned enemy died.
    pub fn full_clear(&self) -> bool {
        self.spawned > 0 && self.killed == self.spawned
    }
}
