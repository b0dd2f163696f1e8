//! Moore-neighborhood queries.

use super::GridMap;
use crate::types::{CellIndex, CellType};

/// `(d_row, d_col)` offsets in enumeration order.
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl GridMap {
    /// In-bounds Moore neighbors of `(row, col)` in [`MOORE_OFFSETS`] order.
    ///
    /// The center itself need not be in bounds; only the neighbors are checked.
    pub fn neighbors(&self, row: i32, col: i32) -> impl Iterator<Item = CellIndex> + '_ {
        let center = CellIndex::new(row, col);
        MOORE_OFFSETS
            .into_iter()
            .filter_map(move |(d_row, d_col)| center.offset(d_row, d_col))
            .filter(move |cell| self.is_valid_position(cell.row, cell.col))
    }

    pub fn get_neighbors(&self, row: i32, col: i32) -> Vec<CellIndex> {
        self.neighbors(row, col).collect()
    }

    pub fn get_neighbors_of_type(&self, row: i32, col: i32, cell_type: CellType) -> Vec<CellIndex> {
        self.neighbors(row, col)
            .filter(|cell| matches!(self.get_cell(cell.row, cell.col), Ok(value) if value == cell_type))
            .collect()
    }

    pub fn get_traversable_neighbors(&self, row: i32, col: i32) -> Vec<CellIndex> {
        self.get_neighbors_of_type(row, col, CellType::Traversable)
    }

    pub fn get_cuttable_neighbors(&self, row: i32, col: i32) -> Vec<CellIndex> {
        self.get_neighbors_of_type(row, col, CellType::Cuttable)
    }

    pub fn get_non_traversable_neighbors(&self, row: i32, col: i32) -> Vec<CellIndex> {
        self.get_neighbors_of_type(row, col, CellType::NonTraversable)
    }
}
