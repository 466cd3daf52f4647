//! Validation of folders proposed for local data sources.
//!
//! A local backend serves the whole parent of a data source folder, so the
//! parent must exist below the filesystem root and accept new files.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use stowage_core::{DataSource, StorageType};
use uuid::Uuid;

use crate::binder::split_folder;
use crate::error::{LocationError, LocationResult};

/// Validate the folder of a local data source. Other storage types pass
/// without touching the filesystem.
pub fn validate_data_source(source: &DataSource) -> LocationResult<()> {
    match source.storage_type {
        StorageType::Local => validate_location(source.folder()),
        StorageType::ObjectGateway => Ok(()),
    }
}

/// Check that `folder` exists, is at least two levels deep and that its
/// parent is writable. Stops at the first failing check.
pub fn validate_location(folder: &str) -> LocationResult<()> {
    let path = Path::new(folder);

    match fs::metadata(path) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LocationError::NotFound(path.to_path_buf()));
        }
        Err(e) => {
            tracing::debug!(
                folder = %folder,
                error = %e,
                "Could not stat folder, checking parent anyway"
            );
        }
    }

    let (parent, _) = split_folder(folder);
    if parent.trim_matches(std::path::is_separator).is_empty() {
        return Err(LocationError::InsufficientDepth(path.to_path_buf()));
    }

    let parent = Path::new(parent);
    let probe = ProbeFile::create(parent).map_err(|source| LocationError::NotWritable {
        path: parent.to_path_buf(),
        source,
    })?;
    drop(probe);

    tracing::debug!(folder = %folder, "Data source folder validated");
    Ok(())
}

/// Uniquely named empty file, removed when dropped.
struct ProbeFile {
    path: PathBuf,
}

impl ProbeFile {
    fn create(dir: &Path) -> std::io::Result<Self> {
        let path = dir.join(format!(".stowage-probe-{}", Uuid::new_v4()));
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        Ok(ProbeFile { path })
    }
}

impl Drop for ProbeFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove probe file");
        }
    }
}
