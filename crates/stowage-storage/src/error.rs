use std::path::PathBuf;

use stowage_core::AppError;
use thiserror::Error;

/// Reasons a folder cannot hold a local data source.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Folder not found: {0}")]
    NotFound(PathBuf),

    #[error("Folder {0} is too shallow, its parent must not be the filesystem root")]
    InsufficientDepth(PathBuf),

    #[error("Parent folder {path} is not writable: {source}")]
    NotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for location validation
pub type LocationResult<T> = Result<T, LocationError>;

impl From<LocationError> for AppError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::NotFound(path) => AppError::FolderNotFound(path.display().to_string()),
            LocationError::InsufficientDepth(path) => {
                AppError::InsufficientDepth(path.display().to_string())
            }
            LocationError::NotWritable { path, source } => {
                AppError::NotWritable(format!("{}: {}", path.display(), source))
            }
        }
    }
}
