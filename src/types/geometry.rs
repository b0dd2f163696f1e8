//! Index and spatial types used across the grid API.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Grid cell address. Row indexes the world y axis, column the world x axis.
///
/// Signed so that world points left of or below the origin map to a
/// representable (but out-of-bounds) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex {
    pub row: i32,
    pub col: i32,
}

impl CellIndex {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Cell offset by `(d_row, d_col)`, or `None` on integer overflow.
    #[inline]
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(d_row)?,
            col: self.col.checked_add(d_col)?,
        })
    }
}

impl From<(i32, i32)> for CellIndex {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl From<CellIndex> for (i32, i32) {
    fn from(index: CellIndex) -> Self {
        (index.row, index.col)
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// World-axis-aligned extent of a grid in meters.
/// Convention: [x_min, x_max) x [y_min, y_max).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl WorldBounds {
    #[inline]
    pub fn min(&self) -> DVec2 {
        DVec2::new(self.x_min, self.y_min)
    }

    #[inline]
    pub fn max(&self) -> DVec2 {
        DVec2::new(self.x_max, self.y_max)
    }

    /// Half-open containment test.
    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.x_min && point.x < self.x_max && point.y >= self.y_min && point.y < self.y_max
    }
}
