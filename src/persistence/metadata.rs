//! YAML dump of the map metadata.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::grid::GridMap;
use crate::types::{GridError, GridResult, MapInfo};

pub const METADATA_VERSION: u32 = 1;

/// On-disk metadata record. Shape is duplicated here so a reader can cross
/// check it against the cell dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataFile {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub resolution: f64,
    pub origin: [f64; 2],
    pub rows: u32,
    pub cols: u32,
}

impl MetadataFile {
    pub fn from_map(map: &GridMap) -> Self {
        let info = map.info();
        Self {
            version: METADATA_VERSION,
            name: map.name().to_string(),
            description: map.description().to_string(),
            resolution: info.resolution,
            origin: info.origin.to_array(),
            rows: info.rows,
            cols: info.cols,
        }
    }

    pub fn to_yaml(&self) -> GridResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(yaml: &str) -> GridResult<Self> {
        let file: Self = serde_yaml::from_str(yaml)
            .map_err(|err| GridError::CorruptData(format!("malformed metadata: {err}")))?;
        if file.version != METADATA_VERSION {
            return Err(GridError::CorruptData(format!(
                "unsupported metadata version {}, expected {METADATA_VERSION}",
                file.version
            )));
        }
        Ok(file)
    }

    /// Geometry for a cell array of `rows` x `cols`, as read from the dump.
    pub fn map_info(&self, rows: u32, cols: u32) -> GridResult<MapInfo> {
        if (self.rows, self.cols) != (rows, cols) {
            return Err(GridError::CorruptData(format!(
                "metadata shape {}x{} does not match cell data {rows}x{cols}",
                self.rows, self.cols
            )));
        }
        MapInfo::new(rows, cols, self.resolution, DVec2::from_array(self.origin))
            .map_err(|err| GridError::CorruptData(format!("invalid metadata: {err}")))
    }
}
