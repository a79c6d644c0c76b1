//! Spatial clustering bonus and isolation penalty.
//!
//! Grouping is star-shaped around a seed: walking candidates in order, the
//! first unprocessed one seeds a cluster and absorbs every unprocessed
//! candidate within `radius` of the seed. Members are not chained, so two
//! candidates can share a cluster without being within `radius` of each
//! other, and a candidate within range of a member but not of the seed
//! starts its own group. Members of groups too small to survive count as
//! isolated.

use glam::Vec2;
use serde::Serialize;

use sightline_core::config::ClusterConfig;
use sightline_core::enums::Rarity;
use sightline_core::types::EntityId;

use crate::candidate::Candidate;

/// A surviving cluster, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub centroid: Vec2,
    pub members: Vec<EntityId>,
    /// Size bonus applied to every member (core bonus not included).
    pub bonus: f32,
}

/// Multiplier for a cluster of `members` candidates.
pub fn cluster_bonus(members: usize, config: &ClusterConfig) -> f32 {
    let extra = members.saturating_sub(config.min_cluster_size) as f32;
    (1.0 + extra * config.base_bonus_per_member).min(config.max_cluster_bonus.max(1.0))
}

/// Apply cluster bonuses and isolation penalties in place.
///
/// Only candidates flagged in `eligible` take part; `rarities` holds each
/// candidate's resolved rarity. Returns the surviving clusters.
pub fn apply(
    candidates: &mut [Candidate],
    eligible: &[bool],
    rarities: &[Rarity],
    config: &ClusterConfig,
) -> Vec<ClusterSummary> {
    let radius_sq = config.radius * config.radius;
    let core_radius = config.core_radius_percent * config.radius;
    let core_multiplier = config.core_bonus_multiplier.max(1.0);
    let penalty = config.isolation_penalty_multiplier.clamp(0.0, 1.0);

    let mut processed: Vec<bool> = eligible.iter().map(|e| !e).collect();
    let mut members: Vec<usize> = Vec::new();
    let mut summaries = Vec::new();

    for seed in 0..candidates.len() {
        if processed[seed] {
            continue;
        }
        processed[seed] = true;
        members.clear();
        members.push(seed);

        let seed_pos = candidates[seed].position;
        for other in seed + 1..candidates.len() {
            if !processed[other] && seed_pos.distance_squared(candidates[other].position) <= radius_sq {
                processed[other] = true;
                members.push(other);
            }
        }

        if members.len() >= config.min_cluster_size {
            let sum: Vec2 = members.iter().map(|&m| candidates[m].position).sum();
            let centroid = sum / members.len() as f32;
            let bonus = cluster_bonus(members.len(), config);

            for &m in &members {
                let candidate = &mut candidates[m];
                candidate.weight *= bonus;
                if config.core_bonus_enabled && candidate.position.distance(centroid) <= core_radius {
                    candidate.weight *= core_multiplier;
                }
            }

            summaries.push(ClusterSummary {
                centroid,
                members: members.iter().map(|&m| candidates[m].id).collect(),
                bonus,
            });
        } else if config.isolation_penalty_enabled {
            for &m in &members {
                if rarities[m].is_penalisable() {
                    candidates[m].weight *= penalty;
                }
            }
        }
    }

    summaries
}
