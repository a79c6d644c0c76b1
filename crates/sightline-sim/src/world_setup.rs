//! Entity spawn factories for populating the aim world.
//!
//! Monsters carry `GridPosition` and `EntityStatus`; rarity, vitals and
//! type path are optional, mirroring what the host can actually read.

use glam::Vec2;
use hecs::{Entity, EntityBuilder, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use sightline_core::components::{EntityStatus, GridPosition, TypePath, Vitals};
use sightline_core::enums::Rarity;

/// Type path given to pack members.
pub const PACK_MEMBER_PATH: &str = "Metadata/Monsters/Pack/PackMember";

/// Everything needed to spawn one monster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonsterSpec {
    pub position: Vec2,
    pub status: EntityStatus,
    pub rarity: Option<Rarity>,
    pub vitals: Option<Vitals>,
    pub type_path: Option<String>,
}

impl MonsterSpec {
    /// Attackable monster at `position` with no optional attributes.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
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

    pub fn with_status(mut self, status: EntityStatus) -> Self {
        self.status = status;
        self
    }
}

/// Spawn a single monster from `spec`.
pub fn spawn_monster(world: &mut World, spec: MonsterSpec) -> Entity {
    let mut builder = EntityBuilder::new();
    builder.add(GridPosition(spec.position)).add(spec.status);
    if let Some(rarity) = spec.rarity {
        builder.add(rarity);
    }
    if let Some(vitals) = spec.vitals {
        builder.add(vitals);
    }
    if let Some(path) = spec.type_path {
        builder.add(TypePath(path));
    }
    world.spawn(builder.build())
}

/// Spawn `count` monsters of one rarity scattered within `spread` cells of `center`.
/// Each member rolls a random offset and a random life fraction.
pub fn spawn_pack(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    center: Vec2,
    count: usize,
    spread: f32,
    rarity: Rarity,
) -> Vec<Entity> {
    (0..count)
        .map(|_| {
            let offset = if spread > 0.0 {
                Vec2::new(rng.gen_range(-spread..=spread), rng.gen_range(-spread..=spread))
            } else {
                Vec2::ZERO
            };
            let life: f32 = rng.gen_range(0.2..=1.0);
            let spec = MonsterSpec::at(center + offset)
                .with_rarity(rarity)
                .with_vitals(Vitals::life_fraction(life))
                .with_type_path(PACK_MEMBER_PATH);
            spawn_monster(world, spec)
        })
        .collect()
}
