//! Binary dump of the cell array.
//!
//! Layout (little-endian):
//! - Magic: "CGRID" (5 bytes)
//! - Version: u8
//! - Rows: u32
//! - Cols: u32
//! - Reserved: 6 zero bytes
//! - Cells: rows * cols bytes, row-major, one `CellType` discriminant each

use std::io::{ErrorKind, Read, Write};

use crate::grid::GridMap;
use crate::types::{CellType, GridError, GridResult};

const MAGIC: &[u8; 5] = b"CGRID";

pub const FORMAT_VERSION: u8 = 1;

const HEADER_SIZE: usize = 20;

/// Cell array read back from a dump, before it is bound to a map geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCells {
    pub rows: u32,
    pub cols: u32,
    pub data: Vec<CellType>,
}

pub fn write_cells<W: Write>(map: &GridMap, writer: &mut W) -> GridResult<()> {
    let mut header = [0u8; HEADER_SIZE];
    header[0..5].copy_from_slice(MAGIC);
    header[5] = FORMAT_VERSION;
    header[6..10].copy_from_slice(&map.rows().to_le_bytes());
    header[10..14].copy_from_slice(&map.cols().to_le_bytes());
    writer.write_all(&header)?;

    let cells: Vec<u8> = map.data().iter().map(|&cell| cell.as_u8()).collect();
    writer.write_all(&cells)?;
    Ok(())
}

pub fn read_cells<R: Read>(reader: &mut R) -> GridResult<RawCells> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header).map_err(|err| match err.kind() {
        ErrorKind::UnexpectedEof => GridError::CorruptData("truncated cell header".to_string()),
        _ => GridError::Io(err),
    })?;

    if &header[0..5] != MAGIC {
        return Err(GridError::CorruptData("invalid magic bytes".to_string()));
    }
    let version = header[5];
    if version != FORMAT_VERSION {
        return Err(GridError::CorruptData(format!(
            "unsupported cell format version {version}, expected {FORMAT_VERSION}"
        )));
    }

    let rows = u32::from_le_bytes([header[6], header[7], header[8], header[9]]);
    let cols = u32::from_le_bytes([header[10], header[11], header[12], header[13]]);
    if rows == 0 || cols == 0 {
        return Err(GridError::CorruptData(format!(
            "empty grid shape {rows}x{cols}"
        )));
    }
    let expected = (rows as usize)
        .checked_mul(cols as usize)
        .ok_or_else(|| GridError::CorruptData(format!("grid shape {rows}x{cols} overflows")))?;

    // Grow with the actual payload rather than trusting the header for the allocation.
    let mut bytes = Vec::new();
    reader
        .by_ref()
        .take(expected as u64 + 1)
        .read_to_end(&mut bytes)?;
    if bytes.len() < expected {
        return Err(GridError::CorruptData(format!(
            "truncated cell data: expected {expected} bytes, found {}",
            bytes.len()
        )));
    }
    if bytes.len() > expected {
        return Err(GridError::CorruptData(
            "trailing bytes after cell data".to_string(),
        ));
    }

    let data = bytes
        .into_iter()
        .map(CellType::try_from)
        .collect::<GridResult<Vec<_>>>()?;

    Ok(RawCells { rows, cols, data })
}
