//! Directory-based persistence.
//!
//! A map named `name` saved under `dir` lands in `dir/name/` as:
//!
//! ```text
//! data.bin        binary cell dump, see [`raw`]
//! metadata.yaml   name, description, resolution, origin and shape
//! ```
//!
//! Saves are staged in a sibling `.<name>.partial` directory and renamed into
//! place once both files are written, so a failed save never leaves a
//! half-written map behind.

pub mod metadata;
pub mod raw;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use log::{debug, info, warn};

use crate::grid::GridMap;
use crate::types::{GridError, GridResult};

pub use metadata::{METADATA_VERSION, MetadataFile};
pub use raw::{FORMAT_VERSION, RawCells, read_cells, write_cells};

pub const DATA_FILE_NAME: &str = "data.bin";
pub const METADATA_FILE_NAME: &str = "metadata.yaml";

impl GridMap {
    /// Save into `dir_path/<name>/`, creating `dir_path` if needed.
    ///
    /// Fails with `InvalidState` if the map has no name and with
    /// `AlreadyExists` if the destination is already present; an existing
    /// destination is never modified. Returns the destination directory.
    pub fn save(&self, dir_path: impl AsRef<Path>) -> GridResult<PathBuf> {
        let dir_path = dir_path.as_ref();
        validate_name(self.name())?;

        fs::create_dir_all(dir_path)?;
        let target = dir_path.join(self.name());
        if target.try_exists()? {
            return Err(GridError::AlreadyExists(target));
        }

        let staging = dir_path.join(format!(".{}.partial", self.name()));
        commit_staged(&staging, &target, |dir| write_map_files(self, dir))?;

        info!(
            "saved {}x{} grid map '{}' to {}",
            self.rows(),
            self.cols(),
            self.name(),
            target.display()
        );
        Ok(target)
    }

    /// Replace this map's cells, geometry and metadata with the map stored in
    /// `dir_path` (a directory written by [`GridMap::save`]).
    ///
    /// On failure `self` is left unchanged.
    pub fn load(&mut self, dir_path: impl AsRef<Path>) -> GridResult<()> {
        *self = Self::open(dir_path)?;
        Ok(())
    }

    /// Read a map saved by [`GridMap::save`].
    pub fn open(dir_path: impl AsRef<Path>) -> GridResult<Self> {
        let dir_path = dir_path.as_ref();
        if !dir_path.is_dir() {
            return Err(GridError::NotFound(dir_path.to_path_buf()));
        }

        let metadata_path = dir_path.join(METADATA_FILE_NAME);
        let data_path = dir_path.join(DATA_FILE_NAME);
        for path in [&metadata_path, &data_path] {
            if !path.is_file() {
                return Err(GridError::NotFound(path.clone()));
            }
        }

        let metadata = MetadataFile::from_yaml(&fs::read_to_string(&metadata_path)?)?;
        let raw = read_cells(&mut BufReader::new(File::open(&data_path)?))?;
        let info = metadata.map_info(raw.rows, raw.cols)?;

        let mut map = GridMap::from_cells(info, raw.data)
            .map_err(|err| GridError::CorruptData(err.to_string()))?;
        map.set_name(metadata.name);
        map.set_description(metadata.description);

        info!(
            "loaded {}x{} grid map '{}' from {}",
            map.rows(),
            map.cols(),
            map.name(),
            dir_path.display()
        );
        Ok(map)
    }
}

fn validate_name(name: &str) -> GridResult<()> {
    if name.is_empty() {
        return Err(GridError::InvalidState(
            "grid map needs a name before it can be saved".to_string(),
        ));
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(()),
        _ => Err(GridError::InvalidArgument(format!(
            "grid map name {name:?} must be a single path component"
        ))),
    }
}

/// Write into `staging` with `write`, then rename it to `target`.
///
/// On any failure the staging directory is removed again; `target` is only
/// created by the final rename.
fn commit_staged<F>(staging: &Path, target: &Path, write: F) -> GridResult<()>
where
    F: FnOnce(&Path) -> GridResult<()>,
{
    if staging.try_exists()? {
        warn!(
            "removing stale staging directory {}",
            staging.display()
        );
        fs::remove_dir_all(staging)?;
    }
    fs::create_dir(staging)?;

    let written = write(staging).and_then(|()| {
        debug!("renaming {} -> {}", staging.display(), target.display());
        fs::rename(staging, target).map_err(GridError::from)
    });
    if let Err(err) = written {
        if let Err(cleanup) = fs::remove_dir_all(staging) {
            warn!(
                "failed to remove staging directory {}: {cleanup}",
                staging.display()
            );
        }
        return Err(err);
    }
    Ok(())
}

fn write_map_files(map: &GridMap, dir: &Path) -> GridResult<()> {
    let mut data = BufWriter::new(File::create(dir.join(DATA_FILE_NAME))?);
    write_cells(map, &mut data)?;
    data.flush()?;

    let yaml = MetadataFile::from_map(map).to_yaml()?;
    fs::write(dir.join(METADATA_FILE_NAME), yaml)?;
    Ok(())
}
