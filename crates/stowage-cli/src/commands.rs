//! Administrative operations run by the `stowage` binary.
//!
//! Each operation reads the registry, decides, then persists. Nothing here
//! locks the registry file: two `stowage` processes writing the same registry
//! at once can both bind against the same stale view and overwrite each
//! other's file. Operators must run commands against one registry one at a
//! time.
//!
//! Unlike the fail-open `list_*` reads, these operations only treat a
//! namespace that was never written as empty. Any other read failure aborts
//! the command before it writes.

use stowage_core::AppError;
use stowage_registry::{ConfigStore, Registry, RegistryError, RegistryResult, Snapshot};
use stowage_storage::{
    bind_backend_with, find_unused_backend, validate_data_source, Binding, CredentialPolicy,
    DataSource,
};
use validator::Validate;

/// Validate `source`, bind it, and persist the backend and the source.
///
/// Writes happen in order: backend body, backend names, source body, source
/// names. When a write fails the state left behind is either a record body
/// no name list references, which reads ignore and the next write under that
/// name replaces, or a listed backend no source uses, which [`orphan`]
/// reports and a retried bind reuses.
pub fn bind<S: ConfigStore>(
    registry: &Registry<S>,
    source: DataSource,
    policy: &CredentialPolicy,
) -> Result<Binding, AppError> {
    source.validate()?;
    validate_data_source(&source)?;

    let snapshot = load(registry)?;
    let binding = bind_backend_with(&snapshot.backends, source, policy);

    if binding.created {
        registry.save_backend(&binding.backend)?;
        let names = snapshot
            .backends
            .keys()
            .map(String::as_str)
            .chain(std::iter::once(binding.backend.name.as_str()));
        registry.save_backend_names(names)?;
    }

    registry.save_data_source(&binding.source)?;
    let names = snapshot
        .data_sources
        .keys()
        .map(String::as_str)
        .chain(std::iter::once(binding.source.name.as_str()));
    registry.save_source_names(names)?;

    tracing::info!(
        data_source = %binding.source.name,
        backend = %binding.backend.name,
        created = binding.created,
        "Data source bound"
    );
    Ok(binding)
}

/// Remove a data source record and its entry in the name lists.
///
/// Its backend is left in place; [`prune`] removes it once nothing uses it.
pub fn remove<S: ConfigStore>(registry: &Registry<S>, name: &str) -> Result<(), AppError> {
    let sources = or_empty(registry.try_list_data_sources())?;
    if !sources.contains_key(name) {
        return Err(AppError::NotFound(format!(
            "Data source {} does not exist",
            name
        )));
    }

    // Names first: a failure after this leaves an unlisted body, not a
    // listed source without one.
    registry.save_source_names(sources.keys().filter(|key| key.as_str() != name))?;
    registry.remove_data_source(name)?;

    tracing::info!(data_source = %name, "Data source removed");
    Ok(())
}

/// The backend the orphan detector reports, if any.
pub fn orphan<S: ConfigStore>(registry: &Registry<S>) -> Result<Option<String>, AppError> {
    let snapshot = load(registry)?;
    Ok(find_unused_backend(&snapshot.backends, &snapshot.data_sources))
}

/// Delete unused backends one at a time until the detector reports none.
pub fn prune<S: ConfigStore>(registry: &Registry<S>) -> Result<Vec<String>, AppError> {
    let snapshot = load(registry)?;
    let mut backends = snapshot.backends;
    let mut removed = Vec::new();

    while let Some(name) = find_unused_backend(&backends, &snapshot.data_sources) {
        backends.remove(&name);
        registry.save_backend_names(backends.keys())?;
        registry.remove_backend(&name)?;
        tracing::info!(backend = %name, "Unused backend removed");
        removed.push(name);
    }

    Ok(removed)
}

/// Both collections, read strictly.
fn load<S: ConfigStore>(registry: &Registry<S>) -> Result<Snapshot, AppError> {
    Ok(Snapshot {
        data_sources: or_empty(registry.try_list_data_sources())?,
        backends: or_empty(registry.try_list_backends())?,
        fell_back: false,
    })
}

/// A namespace that was never written is empty; other failures are errors.
fn or_empty<T: Default>(read: RegistryResult<T>) -> Result<T, AppError> {
    match read {
        Ok(records) => Ok(records),
        Err(RegistryError::NotFound(path)) => {
            tracing::debug!(path = %path, "Nothing configured yet");
            Ok(T::default())
        }
        Err(e) => Err(AppError::Registry(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use stowage_registry::{ConfigPath, MemoryConfigStore};
    use stowage_storage::StorageType;
    use tempfile::tempdir;

    fn registry() -> Registry<MemoryConfigStore> {
        Registry::new(MemoryConfigStore::new())
    }

    /// In-memory store whose writes start failing once `writes_left` runs out.
    struct FlakyStore {
        inner: MemoryConfigStore,
        writes_left: AtomicUsize,
    }

    impl FlakyStore {
        fn failing_after(writes: usize) -> Self {
            FlakyStore {
                inner: MemoryConfigStore::new(),
                writes_left: AtomicUsize::new(writes),
            }
        }

        fn recover(&self) {
            self.writes_left.store(usize::MAX, Ordering::SeqCst);
        }
    }

    impl ConfigStore for FlakyStore {
        fn get(&self, path: &ConfigPath) -> RegistryResult<Option<Value>> {
            self.inner.get(path)
        }

        fn set(&self, path: &ConfigPath, value: Value) -> RegistryResult<()> {
            let allowed = self
                .writes_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if !allowed {
                return Err(RegistryError::Io {
                    path: PathBuf::from("registry.json"),
                    source: io::Error::other("disk full"),
                });
            }
            self.inner.set(path, value)
        }

        fn delete(&self, path: &ConfigPath) -> RegistryResult<()> {
            self.inner.delete(path)
        }
    }

    fn gateway(name: &str, endpoint: &str, key: &str) -> DataSource {
        DataSource::gateway(name, endpoint, key, format!("{}-secret", key))
    }

    #[test]
    fn bind_persists_backend_and_source() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join("root").join("bucket");
        fs::create_dir_all(&folder).unwrap();

        let registry = registry();
        let source = DataSource::local("ds1", folder.to_str().unwrap(), "");
        let binding = bind(&registry, source, &CredentialPolicy::default()).unwrap();

        let snapshot = registry.snapshot();
        assert!(!snapshot.fell_back);
        assert_eq!(snapshot.backends["local1"], binding.backend);
        assert_eq!(snapshot.data_sources["ds1"], binding.source);
        assert_eq!(snapshot.backends["local1"].storage_type, StorageType::Local);
    }

    #[test]
    fn bind_rejects_invalid_sources() {
        let registry = registry();

        let unnamed = DataSource::gateway("", "https://s3.example.com", "k", "s");
        assert!(matches!(
            bind(&registry, unnamed, &CredentialPolicy::default()),
            Err(AppError::InvalidInput(_))
        ));

        let missing = DataSource::local("ds1", "/no/such/root/bucket", "");
        assert!(matches!(
            bind(&registry, missing, &CredentialPolicy::default()),
            Err(AppError::FolderNotFound(_))
        ));
        assert!(registry.list_backends().is_empty());
    }

    #[test]
    fn undecodable_backend_list_aborts_bind() {
        let registry = registry();
        let policy = CredentialPolicy::default();
        bind(&registry, gateway("s3a", "https://a.example.com", "k1"), &policy).unwrap();

        let names = ConfigPath::item("services", "stowage.grpc.data.objects", "sources");
        registry.store().set(&names, json!("garbage")).unwrap();

        let result = bind(&registry, gateway("s3b", "https://b.example.com", "k2"), &policy);
        assert!(matches!(result, Err(AppError::Registry(_))));
        assert!(matches!(prune(&registry), Err(AppError::Registry(_))));

        let body = registry
            .store()
            .get(&ConfigPath::namespace(
                "services",
                "stowage.grpc.data.objects.gateway1",
            ))
            .unwrap()
            .unwrap();
        assert_eq!(body["ApiKey"], "k1");
        assert_eq!(body["EndpointUrl"], "https://a.example.com");
        assert_eq!(registry.store().get(&names).unwrap(), Some(json!("garbage")));
        assert!(!registry.list_data_sources().contains_key("s3b"));
    }

    #[test]
    fn failed_source_write_leaves_a_reportable_orphan() {
        let registry = Registry::new(FlakyStore::failing_after(2));
        let policy = CredentialPolicy::default();
        let source = gateway("s3a", "https://s3.example.com", "k1");

        let result = bind(&registry, source.clone(), &policy);
        assert!(matches!(result, Err(AppError::Registry(_))));
        assert!(registry.list_data_sources().is_empty());
        assert_eq!(orphan(&registry).unwrap().as_deref(), Some("gateway1"));

        registry.store().recover();
        let binding = bind(&registry, source, &policy).unwrap();
        assert!(!binding.created);
        assert_eq!(binding.backend.name, "gateway1");
        assert_eq!(orphan(&registry).unwrap(), None);
    }

    #[test]
    fn failed_backend_list_write_leaves_nothing_listed() {
        let registry = Registry::new(FlakyStore::failing_after(1));
        let policy = CredentialPolicy::default();
        let source = gateway("s3a", "https://s3.example.com", "k1");

        assert!(bind(&registry, source.clone(), &policy).is_err());
        assert!(registry.list_backends().is_empty());
        assert!(registry.list_data_sources().is_empty());
        assert_eq!(orphan(&registry).unwrap(), None);

        registry.store().recover();
        let binding = bind(&registry, source, &policy).unwrap();
        assert!(binding.created);
        assert_eq!(binding.backend.name, "gateway1");
        assert_eq!(registry.list_data_sources()["s3a"].objects_service_name, "gateway1");
    }

    #[test]
    fn remove_then_prune_clears_the_backend() {
        let registry = registry();
        let policy = CredentialPolicy::default();
        bind(&registry, gateway("s3a", "https://s3.example.com", "k1"), &policy).unwrap();
        bind(&registry, gateway("s3b", "https://s3.example.com", "k2"), &policy).unwrap();
        assert_eq!(orphan(&registry).unwrap(), None);

        remove(&registry, "s3a").unwrap();
        assert_eq!(orphan(&registry).unwrap().as_deref(), Some("gateway1"));

        assert_eq!(prune(&registry).unwrap(), vec!["gateway1".to_string()]);
        assert_eq!(orphan(&registry).unwrap(), None);
        assert_eq!(
            registry.list_backends().keys().collect::<Vec<_>>(),
            vec!["gateway2"]
        );
    }

    #[test]
    fn prune_removes_every_orphan() {
        let registry = registry();
        let policy = CredentialPolicy::default();
        for (name, key) in [("a", "k1"), ("b", "k2"), ("c", "k3")] {
            bind(&registry, gateway(name, "https://s3.example.com", key), &policy).unwrap();
        }
        remove(&registry, "a").unwrap();
        remove(&registry, "c").unwrap();

        let mut removed = prune(&registry).unwrap();
        removed.sort();
        assert_eq!(removed, vec!["gateway1", "gateway3"]);
        assert_eq!(registry.list_backends().len(), 1);
    }

    #[test]
    fn remove_unknown_source_is_not_found() {
        assert!(matches!(
            remove(&registry(), "ghost"),
            Err(AppError::NotFound(_))
        ));
    }
}
