//! Headless frame pipeline host for SIGHTLINE.
//!
//! Owns a hecs world mirroring the host's entity list, applies area and
//! configuration events at tick boundaries, and runs visibility, collection
//! and scoring once per tick to produce `FrameSnapshot`s.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use sightline_core as core;
pub use engine::{AimEngine, AreaSnapshot, EngineConfig, HostEvent};
pub use systems::snapshot::FrameSnapshot;
