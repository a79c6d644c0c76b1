//! Pipeline constants and tuning defaults.

// --- Terrain ---

/// Value reported for any cell outside the grid. Blocks sight for every threshold.
pub const OUT_OF_BOUNDS_VALUE: u8 = u8::MAX;

/// Default terrain value at or above which a cell blocks sight.
pub const DEFAULT_TARGET_LAYER_VALUE: u8 = 2;

// --- Ray casting ---

/// Step distance substituted for an axis the ray direction does not move along.
/// Large enough never to be chosen, finite so sums stay well-defined.
pub const DDA_SENTINEL_DELTA: f32 = 1.0e30;

/// Default number of rays in a radial sweep.
pub const DEFAULT_RAY_COUNT: u32 = 600;

/// Default radial sweep length (cells).
pub const DEFAULT_RAY_LENGTH: f32 = 140.0;

/// Default radius of the terrain sample disc around the observer (cells).
pub const DEFAULT_GRID_SIZE: i32 = 80;

/// Largest accepted sample disc radius (cells).
pub const MAX_GRID_SIZE: i32 = 1000;

// --- Scanning ---

/// Default distance within which entities are considered at all (cells).
pub const DEFAULT_SCAN_DISTANCE: f32 = 100.0;

/// Path prefix of helper entities that are never valid targets.
pub const MONSTER_MODS_PATH_PREFIX: &str = "Metadata/Monsters/MonsterMods/";

// --- Weighting ---

/// Default maximum targeting distance (cells).
pub const DEFAULT_MAX_TARGET_DISTANCE: f32 = 100.0;

/// Default coefficient of the quadratic distance term.
pub const DEFAULT_DISTANCE_WEIGHT: f32 = 2.0;

/// Default coefficient of the health term.
pub const DEFAULT_HP_WEIGHT: f32 = 1.0;

/// Default rarity weights: normal, magic, rare, unique.
pub const DEFAULT_RARITY_WEIGHTS: [f32; 4] = [1.0, 2.0, 3.0, 4.0];

/// Default weight added for custom-priority matches.
pub const DEFAULT_CUSTOM_WEIGHT: f32 = 2.0;

// --- Clustering ---

/// Default cluster radius (cells).
pub const DEFAULT_CLUSTER_RADIUS: f32 = 25.0;

/// Default minimum members for a cluster to count.
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 3;

/// Default bonus per member beyond the minimum cluster size.
pub const DEFAULT_BONUS_PER_MEMBER: f32 = 0.1;

/// Default cap on the cluster bonus multiplier.
pub const DEFAULT_MAX_CLUSTER_BONUS: f32 = 2.0;

/// Default multiplier for members near the cluster centroid.
pub const DEFAULT_CORE_BONUS_MULTIPLIER: f32 = 1.2;

/// Default core radius as a fraction of the cluster radius.
pub const DEFAULT_CORE_RADIUS_PERCENT: f32 = 0.5;

/// Default multiplier applied to isolated normal/magic monsters.
pub const DEFAULT_ISOLATION_PENALTY: f32 = 0.8;

// --- Smoothing ---

/// Default exponential smoothing factor.
pub const DEFAULT_SMOOTHING_FACTOR: f32 = 0.3;

/// Default number of scoring passes between cache purges.
pub const DEFAULT_CACHE_PURGE_INTERVAL: u32 = 60;
