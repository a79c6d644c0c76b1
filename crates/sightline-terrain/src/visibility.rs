//! Visibility engine: line-of-sight queries over the cached terrain grid.
//!
//! Owns the area's `TerrainGrid` and the per-frame `VisibilityField`.
//! Every query degrades to "not visible" instead of failing: no grid,
//! malformed grid and out-of-bounds points all answer false.

use std::collections::{HashMap, HashSet};

use glam::{IVec2, Vec2};
use serde::Serialize;
use tracing::{debug, trace, warn};

use sightline_core::config::RaycastConfig;
use sightline_core::constants::DEFAULT_TARGET_LAYER_VALUE;
use sightline_core::types::{cell_center, cell_of};

use crate::grid::TerrainGrid;
use crate::trace::{march, sweep_ray, Trace, TraceOutcome};

/// The observer all traces start from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ObserverState {
    /// Grid-space position.
    pub position: Vec2,
    /// Terrain height under the observer. Rendering only.
    pub height: Option<f32>,
}

/// A ray drawn by the overlay, in grid space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RaySegment {
    pub start: Vec2,
    pub end: Vec2,
}

/// A terrain value sampled near the observer for the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TerrainSample {
    pub cell: IVec2,
    pub value: u8,
}

/// Everything the last observer update saw. Diagnostics only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VisibilityField {
    /// Cells determined visible this frame.
    pub visible: HashSet<IVec2>,
    /// Every cell entered by any trace this frame.
    pub traversed: HashSet<IVec2>,
    pub segments: Vec<RaySegment>,
    pub samples: Vec<TerrainSample>,
}

impl VisibilityField {
    pub fn clear(&mut self) {
        self.visible.clear();
        self.traversed.clear();
        self.segments.clear();
        self.samples.clear();
    }

    pub fn is_cell_visible(&self, cell: IVec2) -> bool {
        self.visible.contains(&cell)
    }

    fn record(&mut self, trace: &Trace) {
        self.traversed.extend(trace.cells.iter().copied());
        self.segments.push(RaySegment {
            start: cell_center(trace.start),
            end: cell_center(trace.end_cell()),
        });
    }
}

/// Grid line-of-sight engine.
#[derive(Debug, Clone)]
pub struct VisibilityEngine {
    grid: Option<TerrainGrid>,
    observer: ObserverState,
    /// Blocking threshold used by the last update and by fallback queries.
    threshold: u8,
    /// Memoised visibility per queried target cell for the current frame.
    results: HashMap<IVec2, bool>,
    field: VisibilityField,
}

impl VisibilityEngine {
    pub fn new() -> Self {
        Self {
            grid: None,
            observer: ObserverState::default(),
            threshold: DEFAULT_TARGET_LAYER_VALUE,
            results: HashMap::new(),
            field: VisibilityField::default(),
        }
    }

    /// Replace the grid with a deep copy of `rows` (`value[y][x]`).
    ///
    /// A malformed snapshot leaves the engine without a grid.
    pub fn rebuild_area<R: AsRef<[u8]>>(&mut self, rows: &[R]) {
        match TerrainGrid::from_rows(rows) {
            Ok(grid) => self.rebuild_from_grid(grid),
            Err(err) => {
                warn!(error = %err, "Malformed terrain snapshot, visibility disabled for this area");
                self.clear_area();
            }
        }
    }

    /// Replace the grid with an already-built one.
    pub fn rebuild_from_grid(&mut self, grid: TerrainGrid) {
        debug!(width = grid.width(), height = grid.height(), "Terrain grid rebuilt");
        self.grid = Some(grid);
        self.results.clear();
        self.field.clear();
    }

    /// Drop the grid; every query answers not visible until the next rebuild.
    pub fn clear_area(&mut self) {
        self.grid = None;
        self.results.clear();
        self.field.clear();
    }

    pub fn grid(&self) -> Option<&TerrainGrid> {
        self.grid.as_ref()
    }

    pub fn observer(&self) -> ObserverState {
        self.observer
    }

    pub fn field(&self) -> &VisibilityField {
        &self.field
    }

    pub fn set_observer_height(&mut self, height: Option<f32>) {
        self.observer.height = height;
    }

    /// Move the observer and recompute visibility for this frame.
    ///
    /// With `Some(targets)` one trace is cast per distinct target cell and its
    /// result memoised. With `None` a radial sweep of `config.ray_count` rays
    /// populates the field instead.
    pub fn update_observer(&mut self, position: Vec2, targets: Option<&[Vec2]>, config: &RaycastConfig) {
        self.observer.position = position;
        self.threshold = config.target_layer_value;
        self.results.clear();
        self.field.clear();

        let Some(grid) = self.grid.as_ref() else {
            return;
        };
        let origin = cell_of(position);
        if grid.contains(origin) {
            self.field.visible.insert(origin);
        }

        if config.collect_samples {
            collect_samples(grid, origin, config.grid_size, &mut self.field.samples);
        }

        match targets {
            Some(targets) => {
                for &target in targets {
                    let cell = cell_of(target);
                    if self.results.contains_key(&cell) {
                        continue;
                    }
                    let traced = march(grid, origin, cell, self.threshold);
                    let visible = traced.is_clear();
                    if visible {
                        self.field.visible.insert(cell);
                    }
                    self.field.record(&traced);
                    self.results.insert(cell, visible);
                }
                trace!(targets = self.results.len(), "Targeted visibility update");
            }
            None => {
                let rays = config.ray_count.max(1);
                let step = std::f32::consts::TAU / rays as f32;
                for i in 0..rays {
                    let ray = sweep_ray(grid, origin, step * i as f32, config.ray_length, self.threshold);
                    let clear_cells = match ray.outcome {
                        TraceOutcome::Blocked(_) => ray.cells.len().saturating_sub(1),
                        _ => ray.cells.len(),
                    };
                    self.field.visible.extend(ray.cells[..clear_cells].iter().copied());
                    self.field.record(&ray);
                }
                trace!(rays, visible = self.field.visible.len(), "Radial visibility sweep");
            }
        }
    }

    /// Whether `point` is visible from the current observer.
    ///
    /// Points whose cell was a target of the last update return the memoised
    /// result; anything else is traced on the spot without touching state.
    pub fn is_visible(&self, point: Vec2) -> bool {
        let Some(grid) = self.grid.as_ref() else {
            return false;
        };
        let cell = cell_of(point);
        if !grid.contains(cell) {
            return false;
        }
        if let Some(&visible) = self.results.get(&cell) {
            return visible;
        }
        march(grid, cell_of(self.observer.position), cell, self.threshold).is_clear()
    }

    /// Trace from the current observer to `point`, for diagnostics.
    pub fn trace_to(&self, point: Vec2) -> Trace {
        let origin = cell_of(self.observer.position);
        match self.grid.as_ref() {
            Some(grid) => march(grid, origin, cell_of(point), self.threshold),
            None => Trace::no_grid(origin),
        }
    }
}

impl Default for VisibilityEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Record every in-grid cell within `radius` cells of `origin`.
fn collect_samples(grid: &TerrainGrid, origin: IVec2, radius: i32, out: &mut Vec<TerrainSample>) {
    if radius < 0 {
        return;
    }
    // Only the part of the disc that overlaps the grid is walked.
    let min_x = origin.x.saturating_sub(radius).max(0);
    let max_x = origin.x.saturating_add(radius).min(grid.width() as i32 - 1);
    let min_y = origin.y.saturating_sub(radius).max(0);
    let max_y = origin.y.saturating_add(radius).min(grid.height() as i32 - 1);
    let radius_sq = i64::from(radius) * i64::from(radius);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = i64::from(x - origin.x);
            let dy = i64::from(y - origin.y);
            if dx * dx + dy * dy > radius_sq {
                continue;
            }
            let cell = IVec2::new(x, y);
            if let Some(value) = grid.get(cell) {
                out.push(TerrainSample { cell, value });
            }
        }
    }
}
