//! Construction-time configuration.

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::{CellType, DEFAULT_RESOLUTION, GridError, GridResult, MapInfo};

/// Options recognised when building a [`crate::GridMap`].
///
/// Every field is optional in YAML; missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    /// Meters per cell edge.
    pub resolution: f64,
    /// World position `[x, y]` of the corner of cell (0, 0).
    pub origin: [f64; 2],
    /// Fill value for every cell at creation.
    pub default_cell_type: CellType,
    pub name: String,
    pub description: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        let info = MapInfo::default();
        Self {
            rows: info.rows,
            cols: info.cols,
            resolution: DEFAULT_RESOLUTION,
            origin: [0.0, 0.0],
            default_cell_type: CellType::default(),
            name: String::new(),
            description: String::new(),
        }
    }
}

impl GridConfig {
    pub fn from_yaml_str(yaml: &str) -> GridResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> GridResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(GridError::NotFound(path.to_path_buf()));
        }
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    #[inline]
    pub fn origin(&self) -> DVec2 {
        DVec2::from_array(self.origin)
    }

    /// Validated geometry described by this configuration.
    pub fn map_info(&self) -> GridResult<MapInfo> {
        MapInfo::new(self.rows, self.cols, self.resolution, self.origin())
    }
}
