//! TerrainGrid: per-area lookup of terrain values.

use glam::IVec2;
use thiserror::Error;

use sightline_core::constants::OUT_OF_BOUNDS_VALUE;

/// Reasons a terrain snapshot cannot become a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("terrain snapshot has no cells")]
    Empty,

    #[error("terrain row {row} has {actual} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("terrain data has {actual} cells, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Immutable terrain value grid, rebuilt wholesale on area change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainGrid {
    width: u32,
    height: u32,
    /// Terrain values, row-major (y rows of x columns).
    values: Vec<u8>,
}

impl TerrainGrid {
    /// Create a grid from row-major values.
    pub fn new(width: u32, height: u32, values: Vec<u8>) -> Result<Self, GridError> {
        let expected = width as usize * height as usize;
        if expected == 0 {
            return Err(GridError::Empty);
        }
        if values.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Deep-copy a `value[y][x]` snapshot. Later changes to `rows` do not affect the grid.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut values = Vec::with_capacity(width * rows.len());
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    actual: cells.len(),
                });
            }
            values.extend_from_slice(cells);
        }

        Self::new(width as u32, rows.len() as u32, values)
    }

    /// Grid filled with a single value.
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self, GridError> {
        Self::new(width, height, vec![value; width as usize * height as usize])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `cell` lies inside the grid.
    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    /// Terrain value at `cell`, or None outside the grid.
    pub fn get(&self, cell: IVec2) -> Option<u8> {
        if !self.contains(cell) {
            return None;
        }
        let idx = cell.y as usize * self.width as usize + cell.x as usize;
        self.values.get(idx).copied()
    }

    /// Terrain value at `cell`; cells outside the grid read as blocked.
    pub fn value_at(&self, cell: IVec2) -> u8 {
        self.get(cell).unwrap_or(OUT_OF_BOUNDS_VALUE)
    }

    /// Overwrite one cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, cell: IVec2, value: u8) {
        if self.contains(cell) {
            let idx = cell.y as usize * self.width as usize + cell.x as usize;
            self.values[idx] = value;
        }
    }
}
