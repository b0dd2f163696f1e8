//! Per-cell classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::GridError;

/// Classification of a single grid cell.
///
/// The discriminants are the on-disk byte values of the raw array dump.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CellType {
    /// Cell cannot be entered.
    NonTraversable = 0,
    /// Cell can be entered but is not a target of the coverage action.
    Traversable = 1,
    /// Cell can be entered and should be covered.
    #[default]
    Cuttable = 2,
}

impl CellType {
    pub const ALL: [CellType; 3] = [
        CellType::NonTraversable,
        CellType::Traversable,
        CellType::Cuttable,
    ];

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for CellType {
    type Error = GridError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CellType::NonTraversable),
            1 => Ok(CellType::Traversable),
            2 => Ok(CellType::Cuttable),
            other => Err(GridError::CorruptData(format!(
                "unknown cell type value {other}"
            ))),
        }
    }
}

impl From<CellType> for u8 {
    fn from(value: CellType) -> Self {
        value as u8
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellType::NonTraversable => "non_traversable",
            CellType::Traversable => "traversable",
            CellType::Cuttable => "cuttable",
        };
        f.write_str(name)
    }
}

impl FromStr for CellType {
    type Err = GridError;

    /// Accepts the snake_case names used in YAML as well as the byte values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "non_traversable" | "0" => Ok(CellType::NonTraversable),
            "traversable" | "1" => Ok(CellType::Traversable),
            "cuttable" | "2" => Ok(CellType::Cuttable),
            other => Err(GridError::InvalidArgument(format!(
                "unknown cell type {other:?}"
            ))),
        }
    }
}
