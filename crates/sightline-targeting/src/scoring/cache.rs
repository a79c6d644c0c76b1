//! Per-entity caches kept across frames.

use std::collections::{HashMap, HashSet};

use sightline_core::components::Vitals;
use sightline_core::enums::Rarity;
use sightline_core::types::EntityId;

use super::smoothing;

/// Cross-frame scoring state, keyed by entity id.
#[derive(Debug, Clone, Default)]
pub struct ScoringState {
    rarity: HashMap<EntityId, Rarity>,
    vitals: HashMap<EntityId, Vitals>,
    previous: HashMap<EntityId, f32>,
}

impl ScoringState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observed rarity if present (cached on first sight), else the cached
    /// value, else Normal.
    pub fn resolve_rarity(&mut self, id: EntityId, observed: Option<Rarity>) -> Rarity {
        match observed {
            Some(rarity) => *self.rarity.entry(id).or_insert(rarity),
            None => self.rarity.get(&id).copied().unwrap_or_default(),
        }
    }

    /// Observed vitals if present (and remembered), else the last ones seen.
    pub fn resolve_vitals(&mut self, id: EntityId, observed: Option<Vitals>) -> Option<Vitals> {
        match observed {
            Some(vitals) => {
                self.vitals.insert(id, vitals);
                Some(vitals)
            }
            None => self.vitals.get(&id).copied(),
        }
    }

    /// Smooth `raw` against the last emitted weight for `id` and remember the result.
    pub fn smooth(&mut self, id: EntityId, raw: f32, factor: f32) -> f32 {
        let weight = smoothing::smooth(self.previous.get(&id).copied(), raw, factor);
        self.previous.insert(id, weight);
        weight
    }

    pub fn previous_weight(&self, id: EntityId) -> Option<f32> {
        self.previous.get(&id).copied()
    }

    /// Forget the last emitted weight for `id`; its next smoothed weight starts raw.
    pub fn forget_previous(&mut self, id: EntityId) {
        self.previous.remove(&id);
    }

    pub fn clear_previous(&mut self) {
        self.previous.clear();
    }

    /// Drop every cached entry whose id is not in `keep`. Returns entries removed.
    pub fn purge(&mut self, keep: &HashSet<EntityId>) -> usize {
        let before = self.len();
        self.rarity.retain(|id, _| keep.contains(id));
        self.vitals.retain(|id, _| keep.contains(id));
        self.previous.retain(|id, _| keep.contains(id));
        before - self.len()
    }

    pub fn rarity_len(&self) -> usize {
        self.rarity.len()
    }

    pub fn vitals_len(&self) -> usize {
        self.vitals.len()
    }

    pub fn previous_len(&self) -> usize {
        self.previous.len()
    }

    /// Total cached entries across all tables.
    pub fn len(&self) -> usize {
        self.rarity.len() + self.vitals.len() + self.previous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.rarity.clear();
        self.vitals.clear();
        self.previous.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_cached_on_first_sight() {
        let mut state = ScoringState::new();
        let id = EntityId::new(1);
        assert_eq!(state.resolve_rarity(id, None), Rarity::Normal);
        assert_eq!(state.rarity_len(), 0, "Unknown rarity is not cached");

        assert_eq!(state.resolve_rarity(id, Some(Rarity::Rare)), Rarity::Rare);
        assert_eq!(state.resolve_rarity(id, None), Rarity::Rare);
    }

    #[test]
    fn test_vitals_fall_back_to_last_seen() {
        let mut state = ScoringState::new();
        let id = EntityId::new(1);
        assert_eq!(state.resolve_vitals(id, None), None);
        state.resolve_vitals(id, Some(Vitals::life_fraction(0.4)));
        assert_eq!(state.resolve_vitals(id, None), Some(Vitals::life_fraction(0.4)));
        state.resolve_vitals(id, Some(Vitals::life_fraction(0.1)));
        assert_eq!(state.resolve_vitals(id, None), Some(Vitals::life_fraction(0.1)));
    }

    #[test]
    fn test_purge_keeps_live_ids() {
        let mut state = ScoringState::new();
        let (a, b) = (EntityId::new(1), EntityId::new(2));
        for id in [a, b] {
            state.resolve_rarity(id, Some(Rarity::Magic));
            state.resolve_vitals(id, Some(Vitals::default()));
            state.smooth(id, 1.0, 0.5);
        }
        let removed = state.purge(&HashSet::from([a]));
        assert_eq!(removed, 3);
        assert_eq!(state.len(), 3);
        assert_eq!(state.previous_weight(b), None);
        assert_eq!(state.previous_weight(a), Some(1.0));
    }
}
