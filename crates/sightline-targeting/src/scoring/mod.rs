//! ScoringEngine: candidates → weighted, sorted candidates.
//!
//! A pass runs stale drop, base weight, clustering, smoothing, periodic cache
//! purge and the final sort, in that order. The engine owns every cross-frame
//! table; `reset` wipes them on area change.

pub mod base;
pub mod cache;
pub mod cluster;
pub mod smoothing;

use std::collections::HashSet;

use glam::Vec2;
use tracing::{debug, trace};

use sightline_core::config::WeightConfig;
use sightline_core::types::EntityId;

use crate::candidate::Candidate;

pub use cache::ScoringState;
pub use cluster::ClusterSummary;

use base::BaseInputs;

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    state: ScoringState,
    clusters: Vec<ClusterSummary>,
    /// Scoring passes since the last cache purge.
    passes: u32,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score `candidates` in place and sort them by descending weight.
    ///
    /// Candidates whose id fails `is_live` are removed first. With weighting
    /// disabled every weight is zero and the list keeps insertion order.
    pub fn update_weights(
        &mut self,
        candidates: &mut Vec<Candidate>,
        observer: Vec2,
        config: &WeightConfig,
        is_live: impl Fn(EntityId) -> bool,
    ) {
        candidates.retain(|c| is_live(c.id));
        self.clusters.clear();

        for candidate in candidates.iter_mut() {
            candidate.distance = observer.distance(candidate.position);
        }

        if !config.enabled {
            for candidate in candidates.iter_mut() {
                candidate.weight = 0.0;
            }
            self.maintain(candidates, config);
            return;
        }

        let mut eligible = Vec::with_capacity(candidates.len());
        let mut rarities = Vec::with_capacity(candidates.len());
        for candidate in candidates.iter_mut() {
            let rarity = self.state.resolve_rarity(candidate.id, candidate.rarity);
            let vitals = self.state.resolve_vitals(candidate.id, candidate.vitals);
            let inputs = BaseInputs {
                distance: candidate.distance,
                rarity,
                vitals,
                type_path: candidate.type_path.as_deref(),
            };
            candidate.weight = base::base_weight(&inputs, config);
            eligible.push(base::in_range(candidate.distance, config));
            rarities.push(rarity);
        }

        if config.cluster.enabled {
            self.clusters = cluster::apply(candidates, &eligible, &rarities, &config.cluster);
        }

        if config.smoothing.enabled {
            for (candidate, &in_range) in candidates.iter_mut().zip(&eligible) {
                if in_range {
                    candidate.weight =
                        self.state
                            .smooth(candidate.id, candidate.weight, config.smoothing.factor);
                } else {
                    self.state.forget_previous(candidate.id);
                }
            }
        } else {
            self.state.clear_previous();
        }

        self.maintain(candidates, config);

        candidates.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        trace!(
            candidates = candidates.len(),
            clusters = self.clusters.len(),
            "Scored candidates"
        );
    }

    /// Purge caches for ids outside the current set every `cache_purge_interval` passes.
    fn maintain(&mut self, candidates: &[Candidate], config: &WeightConfig) {
        self.passes += 1;
        if self.passes < config.cache_purge_interval.max(1) {
            return;
        }
        self.passes = 0;

        let live: HashSet<EntityId> = candidates.iter().map(|c| c.id).collect();
        let evicted = self.state.purge(&live);
        if evicted > 0 {
            debug!(evicted, remaining = self.state.len(), "Purged scoring caches");
        }
    }

    /// Clear every cache and the last cluster summaries.
    pub fn reset(&mut self) {
        self.state.clear();
        self.clusters.clear();
        self.passes = 0;
    }

    pub fn state(&self) -> &ScoringState {
        &self.state
    }

    /// Clusters found in the last pass.
    pub fn clusters(&self) -> &[ClusterSummary] {
        &self.clusters
    }
}
