//! Target selection for SIGHTLINE.
//!
//! Candidate collection, weight scoring with clustering and smoothing,
//! and the ranked view consumed by aiming. No ECS dependency: operates
//! on plain entity records.

pub mod candidate;
pub mod collector;
pub mod ranked;
pub mod scoring;

pub use sightline_core as core;

pub use candidate::Candidate;
pub use collector::CandidateCollector;
pub use ranked::{RankedTarget, RankedTargetView};
pub use scoring::{ClusterSummary, ScoringEngine, ScoringState};

#[cfg(test)]
mod tests;
