//! Spawn-point and obstacle placement.
//!
//! Distance constraints here are soft: the search is bounded and falls back
//! to the last candidate rather than failing the encounter. Degenerate
//! fallbacks are logged so hosts can see them.

use super::types::EncounterConfig;
use crate::core::constants::OBSTACLE_COUNT;
use glam::Vec2;
use log::warn;
use rand::Rng;

fn random_point<R: Rng>(config: &EncounterConfig, rng: &mut R) -> Vec2 {
    let h = config.arena_half_extent;
    Vec2::new(rng.gen_range(-h..=h), rng.gen_range(-h..=h))
}

/// Pick an enemy spawn point at least `min_player_distance` from the player.
pub fn find_spawn_point<R: Rng>(player: Vec2, config: &EncounterConfig, rng: &mut R) -> Vec2 {
    let mut candidate = random_point(config, rng);
    for _ in 0..config.placement_attempts {
        if candidate.distance(player) >= config.min_player_distance {
            return candidate;
        }
        candidate = random_point(config, rng);
    }
    warn!("spawn point search exhausted attempt budget; using last candidate");
    candidate
}

/// Place the boss-encounter pillars: away from the player and mutually
/// separated by `min_obstacle_separation`.
pub fn place_obstacles<R: Rng>(player: Vec2, config: &EncounterConfig, rng: &mut R) -> Vec<Vec2> {
    let mut placed: Vec<Vec2> = Vec::with_capacity(OBSTACLE_COUNT);
    for _ in 0..OBSTACLE_COUNT {
        let mut candidate = random_point(config, rng);
        let mut satisfied = false;
        for _ in 0..config.placement_attempts {
            let clear_of_player = candidate.distance(player) >= config.min_player_distance;
            let clear_of_others = placed
                .iter()
                .all(|p| candidate.distance(*p) >= config.min_obstacle_separation);
            if clear_of_player && clear_of_others {
                satisfied = true;
                break;
            }
            candidate = random_point(config, rng);
        }
        if !satisfied {
            warn!("obstacle placement exhausted attempt budget; using last candidate");
        }
        placed.push(candidate);
    }
    placed
}

/// Authored boss spawn anchors: single bosses hold the top of the arena,
/// rush pairs flank it.
pub fn boss_positions(count: u32, config: &EncounterConfig) -> Vec<Vec2> {
    let h = config.arena_half_extent;
    if count <= 1 {
        vec![Vec2::new(0.0, h * 0.5)]
    } else {
        (0..count)
            .map(|i| {
                let side = if i % 2 == 0 { -1.0 } else { 1.0 };
                Vec2::new(side * h * 0.4, h * 0.5)
            })
            .collect()
    }
}
