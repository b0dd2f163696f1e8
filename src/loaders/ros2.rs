//! Import of ROS map_server maps (YAML descriptor plus image).

use std::path::{Path, PathBuf};

use glam::DVec2;
use image::GenericImageView;
use log::{debug, info};
use serde::Deserialize;

use crate::grid::GridMap;
use crate::types::{
    CellType, DEFAULT_FREE_THRESH, DEFAULT_OCCUPIED_THRESH, GridError, GridResult, MapInfo,
};

#[derive(Debug, Deserialize)]
struct RosMapMetadata {
    image: String,
    resolution: f64,
    origin: [f64; 3],
    #[serde(
        default = "default_occupied_thresh",
        deserialize_with = "deserialize_threshold"
    )]
    occupied_thresh: f32,
    #[serde(
        default = "default_free_thresh",
        deserialize_with = "deserialize_threshold"
    )]
    free_thresh: f32,
    #[serde(default = "default_negate")]
    negate: Negate,
    #[serde(default = "default_map_mode")]
    mode: MapMode,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Negate {
    Bool(bool),
    Int(i32),
}

impl Negate {
    fn is_negated(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Int(value) => *value != 0,
        }
    }
}

fn default_negate() -> Negate {
    Negate::Bool(false)
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
enum MapMode {
    Trinary,
    Scale,
    Raw,
}

fn default_map_mode() -> MapMode {
    MapMode::Trinary
}

fn default_occupied_thresh() -> f32 {
    DEFAULT_OCCUPIED_THRESH
}

fn default_free_thresh() -> f32 {
    DEFAULT_FREE_THRESH
}

fn deserialize_threshold<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f32::deserialize(deserializer)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(
            "thresholds must be in the range [0.0, 1.0]",
        ))
    }
}

/// How occupancy classes of an imported map become cell types.
#[derive(Debug, Clone)]
pub struct RosImportOptions {
    /// Cell type for free pixels.
    pub free_cell_type: CellType,
    /// Cell type for pixels between the free and occupied thresholds.
    pub unknown_cell_type: CellType,
    /// Map name; defaults to the YAML file stem.
    pub name: Option<String>,
}

impl Default for RosImportOptions {
    fn default() -> Self {
        Self {
            free_cell_type: CellType::Cuttable,
            unknown_cell_type: CellType::NonTraversable,
            name: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Occupancy {
    Free,
    Occupied,
    Unknown,
}

/// Load a map_server map. Occupied pixels are always `NonTraversable`.
///
/// The image's top row is the map's highest row, so image row `y` becomes
/// grid row `height - 1 - y`.
pub fn load_ros_map(yaml_path: impl AsRef<Path>, options: &RosImportOptions) -> GridResult<GridMap> {
    let yaml_path = yaml_path.as_ref();
    if !yaml_path.is_file() {
        return Err(GridError::NotFound(yaml_path.to_path_buf()));
    }
    let yaml_str = std::fs::read_to_string(yaml_path)?;
    let metadata: RosMapMetadata = serde_yaml::from_str(&yaml_str)?;

    if matches!(metadata.mode, MapMode::Trinary | MapMode::Scale)
        && metadata.occupied_thresh <= metadata.free_thresh
    {
        return Err(GridError::InvalidArgument(
            "occupied_thresh must be greater than free_thresh".to_string(),
        ));
    }

    let image_path = resolve_image_path(yaml_path, &metadata.image);
    if !image_path.is_file() {
        return Err(GridError::NotFound(image_path));
    }
    debug!("reading map image {}", image_path.display());
    let image = image::open(&image_path)?;
    let (width, height) = image.dimensions();
    let rgba = image.to_rgba8();

    let info = MapInfo::new(
        height,
        width,
        metadata.resolution,
        DVec2::new(metadata.origin[0], metadata.origin[1]),
    )?;
    let mut data = vec![options.unknown_cell_type; info.cell_count()];

    for y in 0..height {
        for x in 0..width {
            let [r, g, b, a] = rgba.get_pixel(x, y).0;
            let shade = (r as f32 + g as f32 + b as f32) / (3.0 * 255.0);
            let alpha = a as f32 / 255.0;

            let occupancy = classify_pixel(&metadata, shade, alpha);
            let cell_type = match occupancy {
                Occupancy::Free => options.free_cell_type,
                Occupancy::Occupied => CellType::NonTraversable,
                Occupancy::Unknown => options.unknown_cell_type,
            };

            let row = height - y - 1;
            let idx = (row as usize) * (width as usize) + (x as usize);
            data[idx] = cell_type;
        }
    }

    let mut map = GridMap::from_cells(info, data)?;
    let name = match &options.name {
        Some(name) => name.clone(),
        None => yaml_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    map.set_name(name);
    map.set_description(format!("imported from {}", yaml_path.display()));

    info!(
        "imported {}x{} ROS map {} ({} cuttable cells)",
        map.rows(),
        map.cols(),
        yaml_path.display(),
        map.count_cells_of_type(CellType::Cuttable)
    );
    Ok(map)
}

/// `shade` is the mean pixel value in [0, 1]; dark pixels are occupied unless
/// the map is negated. Raw mode reads the pixel value as is and ignores
/// `negate`.
fn classify_pixel(metadata: &RosMapMetadata, shade: f32, alpha: f32) -> Occupancy {
    let by_threshold = |probability: f32| {
        if probability >= metadata.occupied_thresh {
            Occupancy::Occupied
        } else if probability <= metadata.free_thresh {
            Occupancy::Free
        } else {
            Occupancy::Unknown
        }
    };

    let occupancy_of_shade = || {
        if metadata.negate.is_negated() {
            by_threshold(shade)
        } else {
            by_threshold(1.0 - shade)
        }
    };

    match metadata.mode {
        MapMode::Trinary => occupancy_of_shade(),
        MapMode::Scale if alpha < 1.0 => Occupancy::Unknown,
        MapMode::Scale => occupancy_of_shade(),
        MapMode::Raw => {
            // Raw pixel values are occupancy percentages; anything above 100 is unknown.
            let value = (shade * 255.0).round();
            if value > 100.0 {
                Occupancy::Unknown
            } else {
                by_threshold(value / 100.0)
            }
        }
    }
}

fn resolve_image_path(yaml_path: &Path, image_ref: &str) -> PathBuf {
    let image_path = PathBuf::from(image_ref);
    if image_path.is_absolute() {
        return image_path;
    }

    match yaml_path.parent() {
        Some(parent) => parent.join(image_path),
        None => image_path,
    }
}
