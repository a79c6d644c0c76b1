//! ECS components for hecs entities.
//!
//! Components are plain data structs.
//! Targeting logic lives in the engines, not here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Grid-space position of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GridPosition(pub Vec2);

/// Predicate flags the host reports for each entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStatus {
    pub alive: bool,
    pub targetable: bool,
    pub hidden: bool,
    pub hostile: bool,
    /// Entity carries a "cannot be damaged" stat.
    pub invulnerable: bool,
}

impl Default for EntityStatus {
    fn default() -> Self {
        Self {
            alive: true,
            targetable: true,
            hidden: false,
            hostile: true,
            invulnerable: false,
        }
    }
}

impl EntityStatus {
    /// Alive, targetable, visible, hostile and damageable.
    pub fn is_attackable(&self) -> bool {
        self.alive && self.targetable && !self.hidden && self.hostile && !self.invulnerable
    }
}

/// A current/maximum resource pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub current: f32,
    pub max: f32,
}

impl Pool {
    pub fn new(current: f32, max: f32) -> Self {
        Self { current, max }
    }
}

/// Life and energy shield of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub life: Pool,
    pub energy_shield: Pool,
}

impl Vitals {
    pub fn new(life: Pool, energy_shield: Pool) -> Self {
        Self {
            life,
            energy_shield,
        }
    }

    /// Life-only vitals at the given fraction of a 100-point pool.
    pub fn life_fraction(fraction: f32) -> Self {
        Self {
            life: Pool::new(fraction * 100.0, 100.0),
            energy_shield: Pool::default(),
        }
    }

    /// Combined life + energy shield fraction in `[0, 1]`.
    /// An entity with no pools at all counts as full health.
    pub fn fraction(&self) -> f32 {
        let max = self.life.max.max(0.0) + self.energy_shield.max.max(0.0);
        if max <= 0.0 {
            return 1.0;
        }
        let current = self.life.current.max(0.0) + self.energy_shield.current.max(0.0);
        (current / max).clamp(0.0, 1.0)
    }
}

/// Metadata path of an entity's type (e.g. `Metadata/Monsters/Skeletons/Archer`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypePath(pub String);
