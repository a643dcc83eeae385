use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExifError {
    #[error("IO error reading {1:?}: {0}")]
    Io(std::io::Error, PathBuf),
    #[error("EXIF error: {0}")]
    Exif(#[from] exif::Error),
    #[error("Extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ExifError>;
