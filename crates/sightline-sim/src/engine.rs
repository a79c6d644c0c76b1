//! Aim engine: the frame pipeline host.
//!
//! `AimEngine` owns the hecs world, the visibility engine, the candidate
//! collector and the scoring engine. Host events are queued and applied at
//! the next tick boundary; each tick runs the whole pipeline and returns a
//! `FrameSnapshot`. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use sightline_core::config::SightlineConfig;
use sightline_core::enums::{Rarity, TerrainLayer};
use sightline_core::types::EntityId;
use sightline_targeting::{CandidateCollector, RankedTargetView, ScoringEngine};
use sightline_terrain::{VisibilityEngine, VisibilityField};

use crate::systems;
use crate::world_setup;

/// Terrain layers of one area, each `value[y][x]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaSnapshot {
    pub targeting: Vec<Vec<u8>>,
    pub walkable: Vec<Vec<u8>>,
}

impl AreaSnapshot {
    /// Same rows for both layers.
    pub fn uniform(rows: Vec<Vec<u8>>) -> Self {
        Self {
            targeting: rows.clone(),
            walkable: rows,
        }
    }

    pub fn layer(&self, layer: TerrainLayer) -> &[Vec<u8>] {
        match layer {
            TerrainLayer::Targeting => &self.targeting,
            TerrainLayer::Walkable => &self.walkable,
        }
    }
}

/// Events from the host, applied at the next tick boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    AreaChanged(AreaSnapshot),
    TerrainLayerChanged(TerrainLayer),
    ConfigChanged(SightlineConfig),
}

/// Configuration for a new aim engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub sightline: SightlineConfig,
    /// RNG seed for spawned packs. Same seed = same world.
    pub seed: u64,
    /// When false the current target must lie inside the view rectangle.
    pub allow_offscreen: bool,
    /// Half extents of the view rectangle around the observer (cells).
    pub view_half_extents: Vec2,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sightline: SightlineConfig::default(),
            seed: 42,
            allow_offscreen: true,
            view_half_extents: Vec2::new(60.0, 34.0),
        }
    }
}

/// The aim engine. Owns the ECS world and all pipeline state.
pub struct AimEngine {
    world: World,
    config: EngineConfig,
    rng: ChaCha8Rng,
    area: Option<AreaSnapshot>,
    event_queue: VecDeque<HostEvent>,
    frame: u64,

    visibility: VisibilityEngine,
    collector: CandidateCollector,
    scoring: ScoringEngine,
    ranked: RankedTargetView,
    current_target: Option<EntityId>,
}

impl AimEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            world: World::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            area: None,
            event_queue: VecDeque::new(),
            frame: 0,
            visibility: VisibilityEngine::new(),
            collector: CandidateCollector::new(),
            scoring: ScoringEngine::new(),
            ranked: RankedTargetView::default(),
            current_target: None,
        }
    }

    /// Queue a host event for processing at the next tick boundary.
    pub fn queue_event(&mut self, event: HostEvent) {
        self.event_queue.push_back(event);
    }

    pub fn queue_events(&mut self, events: impl IntoIterator<Item = HostEvent>) {
        self.event_queue.extend(events);
    }

    /// Run one frame for an observer at `observer` and return its snapshot.
    pub fn tick(&mut self, observer: Vec2) -> systems::snapshot::FrameSnapshot {
        self.process_events();
        self.frame += 1;

        if self.area.is_none() || !self.config.sightline.enabled {
            return systems::snapshot::skipped(self.frame, observer);
        }

        self.run_pipeline(observer);

        systems::snapshot::build_snapshot(
            self.frame,
            observer,
            &self.ranked,
            self.current_target,
            self.scoring.clusters(),
            self.visibility.field(),
        )
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for the host to mirror its entity list.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn ranked(&self) -> &RankedTargetView {
        &self.ranked
    }

    pub fn field(&self) -> &VisibilityField {
        self.visibility.field()
    }

    pub fn visibility(&self) -> &VisibilityEngine {
        &self.visibility
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    pub fn current_target(&self) -> Option<EntityId> {
        self.current_target
    }

    /// Frames ticked so far, skipped ones included.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Spawn a pack from the engine's seeded RNG.
    pub fn spawn_pack(&mut self, center: Vec2, count: usize, spread: f32, rarity: Rarity) -> Vec<Entity> {
        world_setup::spawn_pack(&mut self.world, &mut self.rng, center, count, spread, rarity)
    }

    fn process_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::AreaChanged(area) => {
                debug!(
                    rows = area.targeting.len(),
                    layer = ?self.config.sightline.raycast.terrain_layer,
                    "Area changed"
                );
                self.area = Some(area);
                self.rebuild_grid();
                self.collector.clear();
                self.scoring.reset();
                self.ranked = RankedTargetView::default();
                self.current_target = None;
            }
            HostEvent::TerrainLayerChanged(layer) => {
                debug!(?layer, "Terrain layer changed");
                if self.config.sightline.raycast.terrain_layer != layer {
                    self.config.sightline.raycast.terrain_layer = layer;
                    self.rebuild_grid();
                }
            }
            HostEvent::ConfigChanged(config) => {
                if let Err(err) = config.validate() {
                    warn!(error = %err, "Rejected configuration change");
                    return;
                }
                debug!("Configuration changed");
                let layer_changed =
                    config.raycast.terrain_layer != self.config.sightline.raycast.terrain_layer;
                self.config.sightline = config;
                if layer_changed {
                    self.rebuild_grid();
                }
            }
        }
    }

    /// Rebuild the visibility grid from the loaded area's selected layer.
    fn rebuild_grid(&mut self) {
        let layer = self.config.sightline.raycast.terrain_layer;
        match self.area.as_ref() {
            Some(area) => self.visibility.rebuild_area(area.layer(layer)),
            None => self.visibility.clear_area(),
        }
    }

    /// Scan, trace, collect, score, rank, select.
    fn run_pipeline(&mut self, observer: Vec2) {
        let config = &self.config.sightline;

        let records = systems::gather::collect_records(&self.world);
        let targets = self.collector.scan(records, observer, &config.scan);

        if targets.is_empty() && config.raycast.sweep_when_idle {
            self.visibility.update_observer(observer, None, &config.raycast);
        } else {
            self.visibility
                .update_observer(observer, Some(targets.as_slice()), &config.raycast);
        }

        let visibility = &self.visibility;
        let candidates = self.collector.retain_visible(|pos| visibility.is_visible(pos));

        let world = &self.world;
        self.scoring.update_weights(candidates, observer, &config.weights, |id| {
            systems::gather::is_live(world, id)
        });

        self.ranked = RankedTargetView::from_candidates(candidates.as_slice());

        let half = self.config.view_half_extents;
        self.current_target = self
            .ranked
            .select(self.config.allow_offscreen, |pos| {
                let offset = (pos - observer).abs();
                offset.x <= half.x && offset.y <= half.y
            })
            .map(|target| target.id);

        trace!(
            frame = self.frame,
            scanned = targets.len(),
            ranked = self.ranked.len(),
            "Frame complete"
        );
    }
}
