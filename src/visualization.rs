use std::path::Path;

use image::{Rgb, RgbImage};
use log::debug;

use crate::GridMap;
use crate::types::{CellType, GridResult};

/// Convert a grid map to a color preview, one pixel per cell.
///
/// - **NonTraversable** becomes red.
/// - **Traversable** becomes yellow.
/// - **Cuttable** becomes green.
///
/// The output image is oriented like typical map images: grid row 0
/// (lowest in world y) is written to the **bottom** of the image.
pub fn grid_map_to_image(map: &GridMap) -> RgbImage {
    let width = map.cols();
    let height = map.rows();
    let mut img = RgbImage::new(width, height);

    for (index, cell_type) in map.cells() {
        let y_img = height - 1 - index.row as u32;
        img.put_pixel(index.col as u32, y_img, Rgb(cell_type_to_rgb(cell_type)));
    }

    img
}

/// Render `map` and write it to `path`; the format follows the extension.
pub fn save_preview(map: &GridMap, path: impl AsRef<Path>) -> GridResult<()> {
    let path = path.as_ref();
    debug!("writing {}x{} preview to {}", map.cols(), map.rows(), path.display());
    grid_map_to_image(map).save(path)?;
    Ok(())
}

fn cell_type_to_rgb(cell_type: CellType) -> [u8; 3] {
    match cell_type {
        CellType::NonTraversable => [200, 40, 40],
        CellType::Traversable => [230, 200, 50],
        CellType::Cuttable => [60, 170, 70],
    }
}
