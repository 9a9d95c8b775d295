//! Skill graph and permanent progression.
//!
//! The static node catalog defines costs, prerequisites, and per-rank
//! effects; [`store::ProgressionStore`] owns the mutable unlocked-rank state,
//! persists it locally, and reconciles it with the remote copy by
//! last-write-wins on the update timestamp.

pub mod persistence;
pub mod store;
pub mod types;

pub use persistence::*;
pub use store::*;
pub use types::*;
