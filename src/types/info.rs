//! Map geometry.

use glam::DVec2;

use super::{DEFAULT_RESOLUTION, GridError, GridResult, WorldBounds};

/// Shape, scale and placement of a grid. This is the only place resolution
/// and origin are stored; metadata views are derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapInfo {
    pub rows: u32,
    pub cols: u32,
    /// Meters per cell edge.
    pub resolution: f64,
    /// World position of the corner of cell (0, 0) in meters.
    pub origin: DVec2,
}

impl Default for MapInfo {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 100,
            resolution: DEFAULT_RESOLUTION,
            origin: DVec2::ZERO,
        }
    }
}

impl MapInfo {
    pub fn new(rows: u32, cols: u32, resolution: f64, origin: DVec2) -> GridResult<Self> {
        let info = Self {
            rows,
            cols,
            resolution,
            origin,
        };
        info.validate()?;
        Ok(info)
    }

    pub fn square(size: u32, resolution: f64) -> Self {
        Self {
            rows: size,
            cols: size,
            resolution,
            ..Default::default()
        }
    }

    /// Check the construction invariants: positive shape, positive finite
    /// resolution and a finite origin.
    pub fn validate(&self) -> GridResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::InvalidArgument(format!(
                "grid shape must be positive, got {}x{}",
                self.rows, self.cols
            )));
        }
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(GridError::InvalidArgument(format!(
                "resolution must be a positive finite number, got {}",
                self.resolution
            )));
        }
        if !self.origin.is_finite() {
            return Err(GridError::InvalidArgument(format!(
                "origin must be finite, got ({}, {})",
                self.origin.x, self.origin.y
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Width of the map in world units (meters), along x.
    #[inline]
    pub fn width_m(&self) -> f64 {
        self.cols as f64 * self.resolution
    }

    /// Height of the map in world units (meters), along y.
    #[inline]
    pub fn height_m(&self) -> f64 {
        self.rows as f64 * self.resolution
    }

    pub fn world_bounds(&self) -> WorldBounds {
        WorldBounds {
            x_min: self.origin.x,
            x_max: self.origin.x + self.width_m(),
            y_min: self.origin.y,
            y_max: self.origin.y + self.height_m(),
        }
    }
}
