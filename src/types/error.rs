use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("cell ({row}, {col}) out of bounds for grid {rows}x{cols}")]
    OutOfBounds {
        row: i32,
        col: i32,
        rows: u32,
        cols: u32,
    },
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("destination already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("corrupt data: {0}")]
    CorruptData(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type GridResult<T> = Result<T, GridError>;
