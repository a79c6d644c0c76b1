//! Read-only ranked projection of scored candidates.

use glam::Vec2;
use serde::Serialize;

use sightline_core::types::EntityId;

use crate::candidate::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedTarget {
    pub id: EntityId,
    pub position: Vec2,
    pub weight: f32,
    pub distance: f32,
}

impl From<&Candidate> for RankedTarget {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id,
            position: candidate.position,
            weight: candidate.weight,
            distance: candidate.distance,
        }
    }
}

/// Candidates in scoring order, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedTargetView {
    entries: Vec<RankedTarget>,
}

impl RankedTargetView {
    /// Project already-sorted candidates. Order is preserved.
    pub fn from_candidates(candidates: &[Candidate]) -> Self {
        Self {
            entries: candidates.iter().map(RankedTarget::from).collect(),
        }
    }

    pub fn entries(&self) -> &[RankedTarget] {
        &self.entries
    }

    pub fn best(&self) -> Option<&RankedTarget> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedTarget> {
        self.entries.iter()
    }

    /// Pick the aim target. With `allow_offscreen` the best entry wins;
    /// otherwise the best entry whose position passes `in_bounds`.
    pub fn select(&self, allow_offscreen: bool, in_bounds: impl Fn(Vec2) -> bool) -> Option<&RankedTarget> {
        if allow_offscreen {
            return self.best();
        }
        self.entries.iter().find(|entry| in_bounds(entry.position))
    }
}
