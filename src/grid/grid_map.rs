use glam::DVec2;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::types::{
    CellIndex, CellType, GridConfig, GridError, GridResult, MapInfo, MapMetadata,
};

/// Dense 2D grid of cell classifications anchored in world space.
///
/// Cells are stored row-major, one byte each. Row indexes the world y axis and
/// column the world x axis; cell (0, 0) has its corner at `info.origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMap {
    info: MapInfo,
    name: String,
    description: String,
    data: Vec<CellType>,
}

/// Cell totals per classification.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    pub non_traversable: usize,
    pub traversable: usize,
    pub cuttable: usize,
}

impl CellCounts {
    pub fn get(&self, cell_type: CellType) -> usize {
        match cell_type {
            CellType::NonTraversable => self.non_traversable,
            CellType::Traversable => self.traversable,
            CellType::Cuttable => self.cuttable,
        }
    }

    pub fn total(&self) -> usize {
        self.non_traversable + self.traversable + self.cuttable
    }
}

impl GridMap {
    /// Create a `rows` x `cols` grid filled with `default_cell_type`.
    pub fn new(
        rows: u32,
        cols: u32,
        resolution: f64,
        origin: DVec2,
        default_cell_type: CellType,
    ) -> GridResult<Self> {
        let info = MapInfo::new(rows, cols, resolution, origin)?;
        Ok(Self::filled(info, default_cell_type))
    }

    /// Create a grid covering `world_size` meters.
    ///
    /// `rows = floor(world_size.x / resolution)` and
    /// `cols = floor(world_size.y / resolution)`. Sizes that round down to zero
    /// cells are rejected like any other empty shape.
    pub fn from_world_size(
        world_size: DVec2,
        resolution: f64,
        origin: DVec2,
        default_cell_type: CellType,
    ) -> GridResult<Self> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(GridError::InvalidArgument(format!(
                "resolution must be a positive finite number, got {resolution}"
            )));
        }
        if !world_size.is_finite() || world_size.min_element() < 0.0 {
            return Err(GridError::InvalidArgument(format!(
                "world size must be finite and non-negative, got ({}, {})",
                world_size.x, world_size.y
            )));
        }

        let rows = cells_along(world_size.x, resolution)?;
        let cols = cells_along(world_size.y, resolution)?;
        Self::new(rows, cols, resolution, origin, default_cell_type)
    }

    pub fn from_config(config: &GridConfig) -> GridResult<Self> {
        let info = config.map_info()?;
        let mut map = Self::filled(info, config.default_cell_type);
        map.name = config.name.clone();
        map.description = config.description.clone();
        Ok(map)
    }

    /// Wrap existing row-major cell data.
    pub fn from_cells(info: MapInfo, data: Vec<CellType>) -> GridResult<Self> {
        info.validate()?;
        if data.len() != info.cell_count() {
            return Err(GridError::InvalidArgument(format!(
                "data length {} does not match map size {}",
                data.len(),
                info.cell_count()
            )));
        }

        Ok(Self {
            info,
            name: String::new(),
            description: String::new(),
            data,
        })
    }

    fn filled(info: MapInfo, cell_type: CellType) -> Self {
        debug!(
            "creating {}x{} grid at {} m/cell filled with {cell_type}",
            info.rows, info.cols, info.resolution
        );
        Self {
            data: vec![cell_type; info.cell_count()],
            info,
            name: String::new(),
            description: String::new(),
        }
    }

    pub fn info(&self) -> &MapInfo {
        &self.info
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.info.rows
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.info.cols
    }

    #[inline]
    pub fn resolution(&self) -> f64 {
        self.info.resolution
    }

    #[inline]
    pub fn origin(&self) -> DVec2 {
        self.info.origin
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.data.len()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn metadata(&self) -> MapMetadata {
        MapMetadata {
            name: self.name.clone(),
            description: self.description.clone(),
            resolution: self.info.resolution,
            origin: self.info.origin,
        }
    }

    /// Row-major cell data.
    pub fn data(&self) -> &[CellType] {
        &self.data
    }

    #[inline]
    pub fn is_valid_position(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as u32) < self.info.rows && (col as u32) < self.info.cols
    }

    #[inline]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if !self.is_valid_position(row, col) {
            return None;
        }
        Some((row as usize) * (self.info.cols as usize) + (col as usize))
    }

    fn out_of_bounds(&self, row: i32, col: i32) -> GridError {
        GridError::OutOfBounds {
            row,
            col,
            rows: self.info.rows,
            cols: self.info.cols,
        }
    }

    /// Bounds-checked lookup shared by every accessor and predicate.
    #[inline]
    fn classify(&self, row: i32, col: i32) -> GridResult<CellType> {
        match self.index(row, col) {
            Some(idx) => Ok(self.data[idx]),
            None => Err(self.out_of_bounds(row, col)),
        }
    }

    pub fn get_cell(&self, row: i32, col: i32) -> GridResult<CellType> {
        self.classify(row, col)
    }

    pub fn set_cell(&mut self, row: i32, col: i32, cell_type: CellType) -> GridResult<()> {
        let Some(idx) = self.index(row, col) else {
            return Err(self.out_of_bounds(row, col));
        };
        self.data[idx] = cell_type;
        Ok(())
    }

    pub fn is_cell_type(&self, row: i32, col: i32, cell_type: CellType) -> GridResult<bool> {
        Ok(self.classify(row, col)? == cell_type)
    }

    pub fn is_traversable(&self, row: i32, col: i32) -> GridResult<bool> {
        self.is_cell_type(row, col, CellType::Traversable)
    }

    pub fn is_cuttable(&self, row: i32, col: i32) -> GridResult<bool> {
        self.is_cell_type(row, col, CellType::Cuttable)
    }

    pub fn is_non_traversable(&self, row: i32, col: i32) -> GridResult<bool> {
        self.is_cell_type(row, col, CellType::NonTraversable)
    }

    /// Every cell with its index, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellIndex, CellType)> + '_ {
        let cols = self.info.cols as usize;
        self.data.iter().enumerate().map(move |(idx, &cell_type)| {
            let index = CellIndex::new((idx / cols) as i32, (idx % cols) as i32);
            (index, cell_type)
        })
    }

    /// All cells equal to `cell_type`, in row-major order.
    pub fn get_all_cells_of_type(&self, cell_type: CellType) -> Vec<CellIndex> {
        self.cells()
            .filter(|&(_, value)| value == cell_type)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn get_all_traversable_cells(&self) -> Vec<CellIndex> {
        self.get_all_cells_of_type(CellType::Traversable)
    }

    pub fn get_all_cuttable_cells(&self) -> Vec<CellIndex> {
        self.get_all_cells_of_type(CellType::Cuttable)
    }

    pub fn get_all_non_traversable_cells(&self) -> Vec<CellIndex> {
        self.get_all_cells_of_type(CellType::NonTraversable)
    }

    pub fn count_cells_of_type(&self, cell_type: CellType) -> usize {
        self.data.iter().filter(|&&value| value == cell_type).count()
    }

    pub fn cell_counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for &cell_type in &self.data {
            match cell_type {
                CellType::NonTraversable => counts.non_traversable += 1,
                CellType::Traversable => counts.traversable += 1,
                CellType::Cuttable => counts.cuttable += 1,
            }
        }
        counts
    }

    /// Overwrite every cell.
    pub fn fill(&mut self, cell_type: CellType) {
        self.data.fill(cell_type);
    }
}

fn cells_along(length_m: f64, resolution: f64) -> GridResult<u32> {
    let cells = (length_m / resolution).floor();
    if cells > u32::MAX as f64 {
        return Err(GridError::InvalidArgument(format!(
            "{length_m} m at {resolution} m/cell exceeds the maximum grid size"
        )));
    }
    Ok(cells as u32)
}
