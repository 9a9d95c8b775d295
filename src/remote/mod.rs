//! Best-effort remote persistence.
//!
//! The backend is an external collaborator: every call here can fail and
//! every failure degrades to the local cache. Fetches answer `None` for
//! "unavailable" (network error, 404, bad payload alike) and pushes answer
//! `false`; nothing propagates upward and nothing retries — the next natural
//! write is the only retry mechanism.

pub mod http;

pub use http::HttpRemoteStore;

use crate::score::WaveScoreEntry;
use crate::skills::ProgressionState;

/// Remote mirror of the persisted aggregates, keyed by device id.
pub trait RemoteStore {
    fn fetch_progression(&self, device_id: &str) -> Option<ProgressionState>;
    fn push_progression(&self, device_id: &str, state: &ProgressionState) -> bool;
    fn fetch_scores(&self, device_id: &str) -> Option<Vec<WaveScoreEntry>>;
    fn push_score(&self, device_id: &str, entry: &WaveScoreEntry) -> bool;
    /// Clears the remote ledger. Must succeed before the local ledger is
    /// allowed to clear.
    fn reset_scores(&self, device_id: &str) -> bool;
}
