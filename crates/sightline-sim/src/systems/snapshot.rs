//! Snapshot system: builds the read-only per-frame `FrameSnapshot`.

use glam::{IVec2, Vec2};
use serde::Serialize;

use sightline_core::types::EntityId;
use sightline_targeting::{ClusterSummary, RankedTarget, RankedTargetView};
use sightline_terrain::VisibilityField;

/// Everything one tick produced, serialisable for hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    /// No area loaded or pipeline disabled; nothing below was computed.
    pub skipped: bool,
    pub observer: Vec2,
    /// Ranked targets, best first.
    pub targets: Vec<RankedTarget>,
    pub current_target: Option<EntityId>,
    pub clusters: Vec<ClusterSummary>,
    /// Visible cells, sorted by row then column.
    pub visible_cells: Vec<IVec2>,
    pub traversed_cells: usize,
    pub ray_segments: usize,
}

/// Snapshot for a frame that did not run.
pub fn skipped(frame: u64, observer: Vec2) -> FrameSnapshot {
    FrameSnapshot {
        frame,
        skipped: true,
        observer,
        ..Default::default()
    }
}

/// Build the snapshot for a completed frame.
pub fn build_snapshot(
    frame: u64,
    observer: Vec2,
    ranked: &RankedTargetView,
    current_target: Option<EntityId>,
    clusters: &[ClusterSummary],
    field: &VisibilityField,
) -> FrameSnapshot {
    let mut visible_cells: Vec<IVec2> = field.visible.iter().copied().collect();
    visible_cells.sort_by_key(|cell| (cell.y, cell.x));

    FrameSnapshot {
        frame,
        skipped: false,
        observer,
        targets: ranked.entries().to_vec(),
        current_target,
        clusters: clusters.to_vec(),
        visible_cells,
        traversed_cells: field.traversed.len(),
        ray_segments: field.segments.len(),
    }
}
