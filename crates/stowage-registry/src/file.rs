//! JSON file backed configuration store.
//!
//! The whole registry lives in one JSON document. Every read loads the file
//! so edits made by other processes are picked up; every write replaces the
//! file through a temporary sibling and a rename.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::{RegistryError, RegistryResult};
use crate::path::ConfigPath;
use crate::store::ConfigStore;
use crate::tree::ConfigTree;

/// Configuration store persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileConfigStore {
    path: PathBuf,
}

impl JsonFileConfigStore {
    /// Store backed by `path`. The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileConfigStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> RegistryResult<ConfigTree> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ConfigTree::default()),
            Err(source) => {
                return Err(RegistryError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(ConfigTree::default());
        }

        let value: Value = serde_json::from_str(&content)?;
        ConfigTree::from_value(value).ok_or_else(|| RegistryError::Decode {
            path: ConfigPath::namespace("", ""),
            reason: format!("{} must contain a JSON object", self.path.display()),
        })
    }

    fn flush(&self, tree: &ConfigTree) -> RegistryResult<()> {
        let io_err = |source: std::io::Error| RegistryError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(io_err)?;

        let content = serde_json::to_vec_pretty(&tree.to_value())?;
        let mut tmp = NamedTempFile::new_in(&dir).map_err(io_err)?;
        tmp.write_all(&content).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;

        tracing::debug!(
            path = %self.path.display(),
            size_bytes = content.len(),
            "Registry file written"
        );
        Ok(())
    }
}

impl ConfigStore for JsonFileConfigStore {
    fn get(&self, path: &ConfigPath) -> RegistryResult<Option<Value>> {
        Ok(self.load()?.get(path).cloned())
    }

    fn set(&self, path: &ConfigPath, value: Value) -> RegistryResult<()> {
        let mut tree = self.load()?;
        tree.set(path, value);
        self.flush(&tree)
    }

    fn delete(&self, path: &ConfigPath) -> RegistryResult<()> {
        let mut tree = self.load()?;
        if tree.delete(path) {
            self.flush(&tree)?;
        }
        Ok(())
    }
}
