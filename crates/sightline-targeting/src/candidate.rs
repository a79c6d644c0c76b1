//! Candidate data model: one entity eligible for scoring this frame.

use glam::Vec2;

use sightline_core::components::Vitals;
use sightline_core::enums::Rarity;
use sightline_core::types::{EntityId, EntityRecord};

/// An entity being scored. `distance` and `weight` are rewritten every frame;
/// `id` is the correlation key for every cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: EntityId,
    /// Grid-space position.
    pub position: Vec2,
    pub rarity: Option<Rarity>,
    pub vitals: Option<Vitals>,
    pub type_path: Option<String>,
    /// Distance to the observer (cells).
    pub distance: f32,
    pub weight: f32,
}

impl Candidate {
    /// Bare candidate with no optional attributes.
    pub fn new(id: EntityId, position: Vec2) -> Self {
        Self {
            id,
            position,
            rarity: None,
            vitals: None,
            type_path: None,
            distance: 0.0,
            weight: 0.0,
        }
    }

    /// Candidate for `record`, with its distance to `observer` filled in.
    pub fn from_record(record: &EntityRecord, observer: Vec2) -> Self {
        Self {
            id: record.id,
            position: record.position,
            rarity: record.rarity,
            vitals: record.vitals,
            type_path: record.type_path.clone(),
            distance: observer.distance(record.position),
            weight: 0.0,
        }
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = Some(rarity);
        self
    }

    pub fn with_vitals(mut self, vitals: Vitals) -> Self {
        self.vitals = Some(vitals);
        self
    }

    pub fn with_type_path(mut self, path: impl Into<String>) -> Self {
        self.type_path = Some(path.into());
        self
    }
}
