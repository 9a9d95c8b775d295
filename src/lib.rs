//! Voidstorm core — the rules engine of a real-time arcade wave shooter.
//!
//! This crate decides what enemies appear when, how boss encounters unfold,
//! how score and skill points are earned and persisted without
//! double-counting, and how skill purchases translate into gameplay stat
//! changes. Rendering, physics, input, and the persistence backend are
//! external collaborators: the host render loop feeds collision/death
//! callbacks in and receives spawn/score/stat effects back. Nothing in here
//! touches pixels.

pub mod core;
pub mod encounter;
pub mod remote;
pub mod score;
pub mod skills;
pub mod utils;
pub mod waves;

use uuid::Uuid;

/// Mint a fresh per-device identifier for first-run installs.
///
/// The identity collaborator normally supplies this; hosts without one can
/// generate an id here and store it alongside the local caches.
pub fn generate_device_id() -> String {
    Uuid::new_v4().to_string()
}
