//! Grid ray marching (DDA).
//!
//! Rays start at the centre of the observer cell and step exactly one cell
//! at a time along whichever axis crosses its next grid line first, so every
//! cell on the discrete line is visited once and no diagonal is skipped.
//! Cost is proportional to the number of cells traversed.

use glam::{IVec2, Vec2};
use serde::Serialize;

use sightline_core::constants::DDA_SENTINEL_DELTA;
use sightline_core::types::cell_center;

use crate::grid::TerrainGrid;

/// How a trace ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TraceOutcome {
    /// The target cell was reached (or a radial ray ran its full length).
    Reached,
    /// A cell at or above the blocking threshold stopped the ray.
    Blocked(IVec2),
    /// The ray left the grid, or the target lies outside it.
    OutOfBounds(IVec2),
    /// No terrain grid is loaded.
    NoGrid,
}

/// Cells visited by one ray and how it ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub start: IVec2,
    /// Cells entered after the start cell, in order. Includes a blocking cell.
    pub cells: Vec<IVec2>,
    pub outcome: TraceOutcome,
}

impl Trace {
    fn new(start: IVec2) -> Self {
        Self {
            start,
            cells: Vec::new(),
            outcome: TraceOutcome::Reached,
        }
    }

    /// Trace recorded when there is no grid to march over.
    pub fn no_grid(start: IVec2) -> Self {
        Self {
            outcome: TraceOutcome::NoGrid,
            ..Self::new(start)
        }
    }

    /// Whether the ray reached its end unobstructed.
    pub fn is_clear(&self) -> bool {
        self.outcome == TraceOutcome::Reached
    }

    /// Last in-grid cell of the ray.
    pub fn end_cell(&self) -> IVec2 {
        self.cells.last().copied().unwrap_or(self.start)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// DDA cell walker state.
struct Walker {
    cell: IVec2,
    step: IVec2,
    /// Ray length needed to cross one full cell along each axis.
    delta: Vec2,
    /// Ray length at which the next grid line is crossed along each axis.
    side: Vec2,
}

impl Walker {
    /// Walker starting at the centre of `cell`, heading along the unit vector `dir`.
    fn new(cell: IVec2, dir: Vec2) -> Self {
        let delta = Vec2::new(axis_delta(dir.x), axis_delta(dir.y));
        Self {
            cell,
            step: IVec2::new(
                if dir.x < 0.0 { -1 } else { 1 },
                if dir.y < 0.0 { -1 } else { 1 },
            ),
            delta,
            // From a cell centre the first grid line is half a cell away.
            side: delta * 0.5,
        }
    }

    /// Axis whose grid line is crossed next. Ties step along y.
    fn next_axis(&self) -> Axis {
        if self.side.x < self.side.y {
            Axis::X
        } else {
            Axis::Y
        }
    }

    /// Ray length at which stepping along `axis` happens.
    fn crossing(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.side.x,
            Axis::Y => self.side.y,
        }
    }

    fn advance(&mut self, axis: Axis) -> IVec2 {
        match axis {
            Axis::X => {
                self.side.x += self.delta.x;
                self.cell.x += self.step.x;
            }
            Axis::Y => {
                self.side.y += self.delta.y;
                self.cell.y += self.step.y;
            }
        }
        self.cell
    }
}

/// `|1 / component|`, or a large finite sentinel when the ray does not move along the axis.
fn axis_delta(component: f32) -> f32 {
    if component.is_finite() && component.abs() >= f32::EPSILON {
        (1.0 / component).abs()
    } else {
        DDA_SENTINEL_DELTA
    }
}

/// Whether a terrain value stops sight.
pub fn is_blocking(value: u8, threshold: u8) -> bool {
    value >= threshold
}

/// March from the centre of `from` to the centre of `to`.
///
/// The target is visible iff the outcome is `Reached`: every cell entered,
/// including `to` itself, must be strictly below `threshold`. An origin
/// outside the grid sees nothing; otherwise `from == to` is trivially
/// visible with no cells.
pub fn march(grid: &TerrainGrid, from: IVec2, to: IVec2, threshold: u8) -> Trace {
    let mut trace = Trace::new(from);
    if !grid.contains(from) {
        trace.outcome = TraceOutcome::OutOfBounds(from);
        return trace;
    }
    if from == to {
        return trace;
    }
    if !grid.contains(to) {
        trace.outcome = TraceOutcome::OutOfBounds(to);
        return trace;
    }

    let dir = (cell_center(to) - cell_center(from)).normalize_or_zero();
    let mut walker = Walker::new(from, dir);

    while walker.cell != to {
        // Once an axis is aligned with the target only the other one may move,
        // so the walk takes exactly |dx| + |dy| steps.
        let axis = if walker.cell.x == to.x {
            Axis::Y
        } else if walker.cell.y == to.y {
            Axis::X
        } else {
            walker.next_axis()
        };
        let cell = walker.advance(axis);

        let Some(value) = grid.get(cell) else {
            trace.outcome = TraceOutcome::OutOfBounds(cell);
            return trace;
        };
        trace.cells.push(cell);

        if is_blocking(value, threshold) {
            trace.outcome = TraceOutcome::Blocked(cell);
            return trace;
        }
    }

    trace
}

/// March outward from the centre of `from` at `angle` radians for up to `max_length` cells.
///
/// Stops early at a blocking cell or the grid edge. A ray that runs its full
/// length ends `Reached`.
pub fn sweep_ray(grid: &TerrainGrid, from: IVec2, angle: f32, max_length: f32, threshold: u8) -> Trace {
    let mut trace = Trace::new(from);
    if !grid.contains(from) {
        trace.outcome = TraceOutcome::OutOfBounds(from);
        return trace;
    }

    let mut walker = Walker::new(from, Vec2::from_angle(angle));
    loop {
        let axis = walker.next_axis();
        if walker.crossing(axis) > max_length {
            return trace;
        }
        let cell = walker.advance(axis);

        let Some(value) = grid.get(cell) else {
            trace.outcome = TraceOutcome::OutOfBounds(cell);
            return trace;
        };
        trace.cells.push(cell);

        if is_blocking(value, threshold) {
            trace.outcome = TraceOutcome::Blocked(cell);
            return trace;
        }
    }
}
