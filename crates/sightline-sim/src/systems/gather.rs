//! Gather system: reads monster components into `EntityRecord`s.

use hecs::{Entity, World};

use sightline_core::components::{EntityStatus, GridPosition, TypePath, Vitals};
use sightline_core::enums::Rarity;
use sightline_core::types::{EntityId, EntityRecord};

/// Stable id for a hecs entity. Generations make respawned slots distinct.
pub fn entity_id(entity: Entity) -> EntityId {
    EntityId::new(entity.to_bits().get())
}

/// The hecs entity behind `id`, if the id came from `entity_id`.
pub fn entity_of(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.get())
}

/// Every positioned entity with a status, in world iteration order.
pub fn collect_records(world: &World) -> Vec<EntityRecord> {
    let mut query = world.query::<(
        &GridPosition,
        &EntityStatus,
        Option<&Rarity>,
        Option<&Vitals>,
        Option<&TypePath>,
    )>();

    query
        .iter()
        .map(|(entity, (pos, status, rarity, vitals, path))| EntityRecord {
            id: entity_id(entity),
            position: pos.0,
            status: *status,
            rarity: rarity.copied(),
            vitals: vitals.copied(),
            type_path: path.map(|p| p.0.clone()),
        })
        .collect()
}

/// Whether `id` still names a living entity in `world`.
pub fn is_live(world: &World, id: EntityId) -> bool {
    let Some(entity) = entity_of(id) else {
        return false;
    };
    world
        .get::<&EntityStatus>(entity)
        .map(|status| status.alive)
        .unwrap_or(false)
}
