//! Score ledger local cache (plain JSON snapshot).

use super::types::WaveScoreEntry;
use crate::utils::persistence::{load_json_or_default, save_json};
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

pub const SCORES_FILE: &str = "scores.json";

/// Load the local ledger snapshot, empty on missing/corrupt file.
pub fn load_scores(dir: &Path) -> BTreeMap<u32, WaveScoreEntry> {
    load_json_or_default(&dir.join(SCORES_FILE))
}

/// Save the local ledger snapshot.
pub fn save_scores(dir: &Path, entries: &BTreeMap<u32, WaveScoreEntry>) -> io::Result<()> {
    save_json(&dir.join(SCORES_FILE), entries)
}
