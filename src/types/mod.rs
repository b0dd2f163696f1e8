pub mod cell;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod info;
pub mod metadata;

pub use cell::CellType;
pub use config::GridConfig;
pub use constants::*;
pub use error::{GridError, GridResult};
pub use geometry::{CellIndex, WorldBounds};
pub use info::MapInfo;
pub use metadata::MapMetadata;
