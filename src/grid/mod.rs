mod grid_map;
pub mod neighbors;
mod transforms;

pub use grid_map::{CellCounts, GridMap};
pub use neighbors::MOORE_OFFSETS;
