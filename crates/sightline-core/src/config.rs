//! Tunable configuration, loaded from JSON.
//!
//! Every struct is `#[serde(default)]` so a partial document only overrides
//! the fields it names. Engines treat configuration as read-only per frame
//! and receive it explicitly on every call.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{Rarity, TerrainLayer};
use crate::error::{ConfigError, Result};

/// Complete pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SightlineConfig {
    /// Master switch. A disabled pipeline skips whole frames.
    pub enabled: bool,
    pub scan: ScanConfig,
    pub raycast: RaycastConfig,
    pub weights: WeightConfig,
}

impl Default for SightlineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scan: ScanConfig::default(),
            raycast: RaycastConfig::default(),
            weights: WeightConfig::default(),
        }
    }
}

impl SightlineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every range constraint.
    pub fn validate(&self) -> Result<()> {
        self.scan.validate()?;
        self.raycast.validate()?;
        self.weights.validate()
    }
}

/// Entity pre-filtering before visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Entities farther than this from the observer are ignored (cells).
    pub scan_distance: f32,
    /// Type paths starting with any of these are never candidates.
    pub excluded_path_prefixes: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            scan_distance: DEFAULT_SCAN_DISTANCE,
            excluded_path_prefixes: vec![MONSTER_MODS_PATH_PREFIX.to_string()],
        }
    }
}

impl ScanConfig {
    fn validate(&self) -> Result<()> {
        non_negative("scan.scan_distance", self.scan_distance)
    }
}

/// Visibility engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaycastConfig {
    /// Radial sweep length (cells).
    pub ray_length: f32,
    /// Number of rays in a radial sweep.
    pub ray_count: u32,
    /// Radius of the terrain sample disc (cells).
    pub grid_size: i32,
    /// Terrain values at or above this block sight.
    pub target_layer_value: u8,
    /// Record terrain samples around the observer for the overlay.
    pub collect_samples: bool,
    /// Run a radial sweep on frames with no in-range targets.
    pub sweep_when_idle: bool,
    pub terrain_layer: TerrainLayer,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            ray_length: DEFAULT_RAY_LENGTH,
            ray_count: DEFAULT_RAY_COUNT,
            grid_size: DEFAULT_GRID_SIZE,
            target_layer_value: DEFAULT_TARGET_LAYER_VALUE,
            collect_samples: true,
            sweep_when_idle: true,
            terrain_layer: TerrainLayer::default(),
        }
    }
}

impl RaycastConfig {
    fn validate(&self) -> Result<()> {
        non_negative("raycast.ray_length", self.ray_length)?;
        if self.ray_count == 0 {
            return Err(invalid("raycast.ray_count", "must be at least 1"));
        }
        if self.grid_size < 0 {
            return Err(invalid("raycast.grid_size", "must not be negative"));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(invalid("raycast.grid_size", "must be at most 1000"));
        }
        Ok(())
    }
}

/// Weighting coefficients for the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    /// When off, every weight is zero and ranking order is insertion order.
    pub enabled: bool,
    /// Candidates beyond this distance get zero weight (cells).
    pub max_target_distance: f32,
    /// Coefficient of the quadratic distance term.
    pub distance_weight: f32,
    pub hp: HpWeighting,
    pub rarity: RarityWeights,
    pub cluster: ClusterConfig,
    pub smoothing: SmoothingConfig,
    pub custom: CustomPriorities,
    /// Scoring passes between purges of departed entities from the caches.
    pub cache_purge_interval: u32,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_target_distance: DEFAULT_MAX_TARGET_DISTANCE,
            distance_weight: DEFAULT_DISTANCE_WEIGHT,
            hp: HpWeighting::default(),
            rarity: RarityWeights::default(),
            cluster: ClusterConfig::default(),
            smoothing: SmoothingConfig::default(),
            custom: CustomPriorities::default(),
            cache_purge_interval: DEFAULT_CACHE_PURGE_INTERVAL,
        }
    }
}

impl WeightConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.max_target_distance > 0.0) {
            return Err(invalid("weights.max_target_distance", "must be positive"));
        }
        non_negative("weights.distance_weight", self.distance_weight)?;
        non_negative("weights.hp.weight", self.hp.weight)?;
        for (field, value) in [
            ("weights.rarity.normal", self.rarity.normal),
            ("weights.rarity.magic", self.rarity.magic),
            ("weights.rarity.rare", self.rarity.rare),
            ("weights.rarity.unique", self.rarity.unique),
        ] {
            non_negative(field, value)?;
        }
        non_negative("weights.custom.weight", self.custom.weight)?;
        self.cluster.validate()?;
        if !(self.smoothing.factor > 0.0 && self.smoothing.factor <= 1.0) {
            return Err(invalid("weights.smoothing.factor", "must be in (0, 1]"));
        }
        if self.cache_purge_interval == 0 {
            return Err(invalid("weights.cache_purge_interval", "must be at least 1"));
        }
        Ok(())
    }
}

/// Health term settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HpWeighting {
    pub enabled: bool,
    /// Prefer healthy targets instead of finishing off wounded ones.
    pub prefer_higher: bool,
    pub weight: f32,
}

impl Default for HpWeighting {
    fn default() -> Self {
        Self {
            enabled: true,
            prefer_higher: false,
            weight: DEFAULT_HP_WEIGHT,
        }
    }
}

/// Per-tier rarity weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityWeights {
    pub enabled: bool,
    pub normal: f32,
    pub magic: f32,
    pub rare: f32,
    pub unique: f32,
}

impl Default for RarityWeights {
    fn default() -> Self {
        let [normal, magic, rare, unique] = DEFAULT_RARITY_WEIGHTS;
        Self {
            enabled: true,
            normal,
            magic,
            rare,
            unique,
        }
    }
}

impl RarityWeights {
    pub fn weight_for(&self, rarity: Rarity) -> f32 {
        match rarity {
            Rarity::Normal => self.normal,
            Rarity::Magic => self.magic,
            Rarity::Rare => self.rare,
            Rarity::Unique => self.unique,
        }
    }
}

/// Spatial clustering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub enabled: bool,
    /// Maximum seed-to-member distance (cells).
    pub radius: f32,
    pub min_cluster_size: usize,
    /// Bonus added per member beyond `min_cluster_size`.
    pub base_bonus_per_member: f32,
    pub max_cluster_bonus: f32,
    pub core_bonus_enabled: bool,
    pub core_bonus_multiplier: f32,
    /// Core radius as a fraction of `radius`.
    pub core_radius_percent: f32,
    pub isolation_penalty_enabled: bool,
    pub isolation_penalty_multiplier: f32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: DEFAULT_CLUSTER_RADIUS,
            min_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
            base_bonus_per_member: DEFAULT_BONUS_PER_MEMBER,
            max_cluster_bonus: DEFAULT_MAX_CLUSTER_BONUS,
            core_bonus_enabled: true,
            core_bonus_multiplier: DEFAULT_CORE_BONUS_MULTIPLIER,
            core_radius_percent: DEFAULT_CORE_RADIUS_PERCENT,
            isolation_penalty_enabled: true,
            isolation_penalty_multiplier: DEFAULT_ISOLATION_PENALTY,
        }
    }
}

impl ClusterConfig {
    fn validate(&self) -> Result<()> {
        non_negative("weights.cluster.radius", self.radius)?;
        if self.min_cluster_size == 0 {
            return Err(invalid("weights.cluster.min_cluster_size", "must be at least 1"));
        }
        non_negative("weights.cluster.base_bonus_per_member", self.base_bonus_per_member)?;
        if !(self.max_cluster_bonus >= 1.0) {
            return Err(invalid("weights.cluster.max_cluster_bonus", "must be at least 1"));
        }
        if !(self.core_bonus_multiplier >= 1.0) {
            return Err(invalid("weights.cluster.core_bonus_multiplier", "must be at least 1"));
        }
        non_negative("weights.cluster.core_radius_percent", self.core_radius_percent)?;
        let penalty = self.isolation_penalty_multiplier;
        if !(penalty > 0.0 && penalty <= 1.0) {
            return Err(invalid(
                "weights.cluster.isolation_penalty_multiplier",
                "must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

/// Frame-to-frame smoothing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub enabled: bool,
    /// Fraction of the gap to the raw weight closed each frame, in `(0, 1]`.
    pub factor: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            factor: DEFAULT_SMOOTHING_FACTOR,
        }
    }
}

/// Custom-priority type path substrings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomPriorities {
    /// Case-insensitive substrings of the entity type path.
    pub priorities: Vec<String>,
    pub weight: f32,
}

impl Default for CustomPriorities {
    fn default() -> Self {
        Self {
            priorities: Vec::new(),
            weight: DEFAULT_CUSTOM_WEIGHT,
        }
    }
}

impl CustomPriorities {
    /// Whether `type_path` contains any configured substring, ignoring case.
    pub fn matches(&self, type_path: &str) -> bool {
        if self.priorities.is_empty() {
            return false;
        }
        let path = type_path.to_lowercase();
        self.priorities
            .iter()
            .filter(|p| !p.is_empty())
            .any(|p| path.contains(&p.to_lowercase()))
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be a finite, non-negative number"))
    }
}
