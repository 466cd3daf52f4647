//! Test helpers: a file-backed registry in a temp dir and the
//! load, validate, bind, persist sequence a serialized caller runs.
//!
//! Run from workspace root: `cargo test -p stowage-storage --test binding_test`.

pub mod fixtures;

use std::fs;
use std::path::PathBuf;

use stowage_registry::{JsonFileConfigStore, Registry};
use stowage_storage::{bind_backend, validate_data_source, Binding, DataSource, LocationError};
use tempfile::TempDir;

pub struct TestRegistry {
    pub dir: TempDir,
    pub registry: Registry<JsonFileConfigStore>,
}

impl TestRegistry {
    pub fn registry_file(&self) -> PathBuf {
        self.dir.path().join("registry.json")
    }

    /// Create `<tmp>/<root>/<bucket>` and return it as a folder string.
    pub fn make_folder(&self, root: &str, bucket: &str) -> String {
        let folder = self.dir.path().join(root).join(bucket);
        fs::create_dir_all(&folder).unwrap();
        folder.to_str().unwrap().to_string()
    }

    /// Validate, bind against the current registry state and persist.
    pub fn bind(&self, source: DataSource) -> Result<Binding, LocationError> {
        validate_data_source(&source)?;

        let snapshot = self.registry.snapshot();
        let binding = bind_backend(&snapshot.backends, source);

        if binding.created {
            self.registry.save_backend(&binding.backend).unwrap();
            let mut names: Vec<&str> = snapshot.backends.keys().map(String::as_str).collect();
            names.push(&binding.backend.name);
            self.registry.save_backend_names(names).unwrap();
        }

        self.registry.save_data_source(&binding.source).unwrap();
        let mut names: Vec<&str> = snapshot.data_sources.keys().map(String::as_str).collect();
        names.push(&binding.source.name);
        self.registry.save_source_names(names).unwrap();

        Ok(binding)
    }
}

pub fn setup_test_registry() -> TestRegistry {
    let dir = TempDir::new().unwrap();
    let store = JsonFileConfigStore::new(dir.path().join("registry.json"));
    TestRegistry {
        dir,
        registry: Registry::new(store),
    }
}
