pub mod grid;
pub mod loaders;
pub mod persistence;
pub mod types;
pub mod visualization;

pub use grid::{CellCounts, GridMap};
pub use loaders::ros2::{RosImportOptions, load_ros_map};
pub use types::{
    CellIndex, CellType, GridConfig, GridError, GridResult, MapInfo, MapMetadata, WorldBounds,
};
pub use visualization::{grid_map_to_image, save_preview};
