//! Base weight: distance falloff plus rarity, health and custom-priority terms.
//!
//! Every term is non-negative and non-increasing in distance, so a nearer
//! candidate never scores below an otherwise identical farther one.

use sightline_core::components::Vitals;
use sightline_core::config::WeightConfig;
use sightline_core::enums::Rarity;

/// Attributes the base weight depends on, already resolved against the caches.
#[derive(Debug, Clone, Copy)]
pub struct BaseInputs<'a> {
    pub distance: f32,
    pub rarity: Rarity,
    pub vitals: Option<Vitals>,
    pub type_path: Option<&'a str>,
}

/// `1 - distance / max_distance`, clamped to `[0, 1]`.
pub fn proximity(distance: f32, max_distance: f32) -> f32 {
    if !(max_distance > 0.0) {
        return 0.0;
    }
    (1.0 - distance / max_distance).clamp(0.0, 1.0)
}

/// Whether a candidate is within targeting range.
pub fn in_range(distance: f32, config: &WeightConfig) -> bool {
    distance <= config.max_target_distance
}

/// Raw weight before clustering and smoothing. Zero beyond `max_target_distance`.
pub fn base_weight(inputs: &BaseInputs<'_>, config: &WeightConfig) -> f32 {
    if !in_range(inputs.distance, config) {
        return 0.0;
    }

    let p = proximity(inputs.distance, config.max_target_distance);
    // Attribute terms fade slower than the distance term.
    let attribute_scale = p.sqrt();

    let mut weight = p * p * config.distance_weight;

    if config.rarity.enabled {
        weight += config.rarity.weight_for(inputs.rarity) * attribute_scale;
    }

    if config.hp.enabled {
        if let Some(vitals) = inputs.vitals {
            let fraction = vitals.fraction();
            let preference = if config.hp.prefer_higher {
                fraction
            } else {
                1.0 - fraction
            };
            weight += preference * config.hp.weight * attribute_scale;
        }
    }

    if let Some(path) = inputs.type_path {
        if config.custom.matches(path) {
            weight += config.custom.weight * attribute_scale;
        }
    }

    weight
}
