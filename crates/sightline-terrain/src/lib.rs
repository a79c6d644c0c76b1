//! Terrain system for SIGHTLINE.
//!
//! Terrain value grid, DDA ray marching, and the per-frame
//! visibility engine.

pub use sightline_core as core;

pub mod grid;
pub mod trace;
pub mod visibility;

// Re-export key types for convenience.
pub use grid::{GridError, TerrainGrid};
pub use trace::{march, sweep_ray, Trace, TraceOutcome};
pub use visibility::{ObserverState, RaySegment, TerrainSample, VisibilityEngine, VisibilityField};
