//! Per-wave score ledger.
//!
//! Append-only and idempotent: each wave number is recorded at most once per
//! run, locally first, mirrored to the remote store on a best-effort basis.

pub mod ledger;
pub mod persistence;
pub mod types;

pub use ledger::*;
pub use persistence::*;
pub use types::*;
