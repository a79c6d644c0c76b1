//! Candidate collection: raw entity records → visible, attackable candidates.
//!
//! Runs in two phases around the visibility update. `scan` keeps attackable
//! entities within scan distance and hands back their positions so the
//! visibility engine can trace them; `retain_visible` then keeps the ones the
//! engine reports visible.

use glam::Vec2;

use sightline_core::config::ScanConfig;
use sightline_core::types::EntityRecord;

use crate::candidate::Candidate;

/// Builds the per-frame candidate list.
#[derive(Debug, Clone, Default)]
pub struct CandidateCollector {
    observer: Vec2,
    scanned: Vec<EntityRecord>,
    candidates: Vec<Candidate>,
}

impl CandidateCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep attackable records within `config.scan_distance` of `observer`.
    /// Returns their positions, in scan order.
    pub fn scan(
        &mut self,
        records: impl IntoIterator<Item = EntityRecord>,
        observer: Vec2,
        config: &ScanConfig,
    ) -> Vec<Vec2> {
        self.observer = observer;
        self.scanned.clear();
        self.candidates.clear();

        self.scanned.extend(records.into_iter().filter(|record| {
            is_eligible(record, config) && observer.distance(record.position) <= config.scan_distance
        }));
        self.scanned.iter().map(|r| r.position).collect()
    }

    /// Turn the scanned records passing `is_visible` into candidates.
    pub fn retain_visible(&mut self, is_visible: impl Fn(Vec2) -> bool) -> &mut Vec<Candidate> {
        let observer = self.observer;
        self.candidates = self
            .scanned
            .drain(..)
            .filter(|record| is_visible(record.position))
            .map(|record| Candidate::from_record(&record, observer))
            .collect();
        &mut self.candidates
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn candidates_mut(&mut self) -> &mut Vec<Candidate> {
        &mut self.candidates
    }

    pub fn take_candidates(&mut self) -> Vec<Candidate> {
        std::mem::take(&mut self.candidates)
    }

    /// Number of records waiting for the visibility phase.
    pub fn scanned_len(&self) -> usize {
        self.scanned.len()
    }

    pub fn clear(&mut self) {
        self.scanned.clear();
        self.candidates.clear();
    }
}

/// Whether a record may be targeted at all, regardless of distance.
pub fn is_eligible(record: &EntityRecord, config: &ScanConfig) -> bool {
    if !record.status.is_attackable() {
        return false;
    }
    match record.type_path.as_deref() {
        Some(path) => !config
            .excluded_path_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && path.starts_with(prefix.as_str())),
        None => true,
    }
}
