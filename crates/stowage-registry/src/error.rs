use std::path::PathBuf;

use stowage_core::AppError;
use thiserror::Error;

use crate::path::ConfigPath;

/// Registry operation errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("No value at {0}")]
    NotFound(ConfigPath),

    #[error("Failed to decode value at {path}: {reason}")]
    Decode { path: ConfigPath, reason: String },

    #[error("Failed to access registry file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Registry lock poisoned")]
    Poisoned,
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(path) => AppError::NotFound(path.to_string()),
            other => AppError::Registry(other.to_string()),
        }
    }
}
