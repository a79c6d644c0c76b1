//! Fundamental identity and snapshot types.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::components::{EntityStatus, Vitals};
use crate::enums::Rarity;

/// Stable identity of a game entity, used as the key for every per-entity cache.
///
/// Identities are never reused for a different entity: a respawned entity
/// gets a new id and therefore starts with empty caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// One entity as read from the host's entity list for the current frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: EntityId,
    /// Grid-space position.
    pub position: Vec2,
    pub status: EntityStatus,
    pub rarity: Option<Rarity>,
    pub vitals: Option<Vitals>,
    /// Metadata path of the entity type, matched against custom priorities.
    pub type_path: Option<String>,
}

impl EntityRecord {
    /// Record with a hostile, targetable status and no optional attributes.
    pub fn hostile(id: EntityId, position: Vec2) -> Self {
        Self {
            id,
            position,
            status: EntityStatus::default(),
            rarity: None,
            vitals: None,
            type_path: None,
        }
    }
}

/// Grid cell containing a grid-space point.
pub fn cell_of(point: Vec2) -> IVec2 {
    point.floor().as_ivec2()
}

/// Grid-space centre of a cell.
pub fn cell_center(cell: IVec2) -> Vec2 {
    cell.as_vec2() + Vec2::splat(0.5)
}
