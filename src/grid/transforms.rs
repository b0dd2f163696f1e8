//! Conversions between grid cells and world coordinates.
//!
//! A cell's world position is its lower-left corner. Neither direction is
//! bounds checked; callers may project outside the grid on purpose.

use glam::DVec2;

use super::GridMap;
use crate::types::{BOUNDARY_EPSILON, CellIndex, WorldBounds};

impl GridMap {
    /// World position of the corner of cell `(row, col)`.
    #[inline]
    pub fn grid_to_world(&self, row: i32, col: i32) -> DVec2 {
        let info = self.info();
        DVec2::new(
            info.origin.x + col as f64 * info.resolution,
            info.origin.y + row as f64 * info.resolution,
        )
    }

    /// World position of the center of cell `(row, col)`.
    #[inline]
    pub fn grid_to_world_center(&self, row: i32, col: i32) -> DVec2 {
        self.grid_to_world(row, col) + DVec2::splat(0.5 * self.resolution())
    }

    /// Cell containing `point`. Floors toward negative infinity, so points just
    /// left of or below the origin land in row/column -1.
    ///
    /// Coordinates saturate at the `i32` range: infinities map to
    /// `i32::MIN`/`i32::MAX` and NaN maps to 0. Check non-finite input with
    /// [`GridMap::contains_world`] before trusting the result.
    #[inline]
    pub fn world_to_grid(&self, point: DVec2) -> CellIndex {
        let info = self.info();
        CellIndex::new(
            world_axis_to_cell(point.y - info.origin.y, info.resolution),
            world_axis_to_cell(point.x - info.origin.x, info.resolution),
        )
    }

    pub fn grid_to_world_path(&self, path: &[CellIndex]) -> Vec<DVec2> {
        path.iter()
            .map(|cell| self.grid_to_world(cell.row, cell.col))
            .collect()
    }

    pub fn world_to_grid_path(&self, path: &[DVec2]) -> Vec<CellIndex> {
        path.iter().map(|&point| self.world_to_grid(point)).collect()
    }

    pub fn world_bounds(&self) -> WorldBounds {
        self.info().world_bounds()
    }

    #[inline]
    pub fn width_m(&self) -> f64 {
        self.info().width_m()
    }

    #[inline]
    pub fn height_m(&self) -> f64 {
        self.info().height_m()
    }

    /// Whether `point` falls on some cell of this grid. Non-finite points never
    /// do.
    pub fn contains_world(&self, point: DVec2) -> bool {
        if !point.is_finite() {
            return false;
        }
        let cell = self.world_to_grid(point);
        self.is_valid_position(cell.row, cell.col)
    }
}

fn world_axis_to_cell(offset: f64, resolution: f64) -> i32 {
    let scaled = offset / resolution;
    let nearest = scaled.round();
    // Products like 3 * 0.1 do not divide back to exactly 3.0.
    let cell = if (scaled - nearest).abs() < BOUNDARY_EPSILON {
        nearest
    } else {
        scaled.floor()
    };
    cell as i32
}
