//! Enumeration types used throughout the pipeline.

use serde::{Deserialize, Serialize};

/// Monster rarity tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Normal,
    Magic,
    Rare,
    Unique,
}

impl Rarity {
    /// Whether an isolated monster of this tier may be penalised.
    /// Rare and unique monsters are always worth the detour.
    pub fn is_penalisable(self) -> bool {
        matches!(self, Rarity::Normal | Rarity::Magic)
    }
}

/// Which terrain layer of the area snapshot feeds the visibility grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainLayer {
    /// Projectile targeting layer (what can be shot through).
    #[default]
    Targeting,
    /// Walkable layer (what can be walked through).
    Walkable,
}
