//! Registry accessor for data source and storage backend records.

use std::collections::{BTreeMap, BTreeSet};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use stowage_core::constants::{
    DATA_INDEX_SERVICE, DATA_OBJECTS_SERVICE, DATA_SYNC_SERVICE, DEFAULT_NAMESPACE_PREFIX,
    SERVICES_CATEGORY, SOURCES_KEY,
};
pub use stowage_core::models::{Backends, DataSources};
use stowage_core::{DataSource, StorageBackend};

use crate::error::{RegistryError, RegistryResult};
use crate::path::ConfigPath;
use crate::store::ConfigStore;

/// Everything a binding decision needs, read in one go.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub data_sources: DataSources,
    pub backends: Backends,
    /// Set when at least one collection could not be read and was replaced
    /// by the empty fallback.
    pub fell_back: bool,
}

impl Snapshot {
    /// The fallback used when the registry cannot be read: nothing configured.
    pub fn empty() -> Self {
        Snapshot::default()
    }
}

/// Reads and writes data source and backend records through a [`ConfigStore`].
#[derive(Debug, Clone)]
pub struct Registry<S> {
    store: S,
    prefix: String,
}

impl<S: ConfigStore> Registry<S> {
    /// Accessor using the default `stowage.grpc.` namespace prefix.
    pub fn new(store: S) -> Self {
        Self::with_prefix(store, DEFAULT_NAMESPACE_PREFIX)
    }

    pub fn with_prefix(store: S, prefix: impl Into<String>) -> Self {
        Registry {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn namespace(&self, service: &str) -> String {
        format!("{}{}", self.prefix, service)
    }

    fn names_path(&self, service: &str) -> ConfigPath {
        ConfigPath::item(SERVICES_CATEGORY, self.namespace(service), SOURCES_KEY)
    }

    fn record_path(&self, service: &str, name: &str) -> ConfigPath {
        ConfigPath::namespace(
            SERVICES_CATEGORY,
            format!("{}.{}", self.namespace(service), name),
        )
    }

    /// All data sources, or an error when the name list cannot be read.
    ///
    /// A missing namespace is reported as [`RegistryError::NotFound`].
    /// Records listed by name but missing or undecodable are skipped.
    pub fn try_list_data_sources(&self) -> RegistryResult<DataSources> {
        self.try_list(DATA_SYNC_SERVICE)
    }

    /// All data sources, failing open to an empty map.
    pub fn list_data_sources(&self) -> DataSources {
        self.try_list_data_sources()
            .unwrap_or_else(|e| fallback("data sources", e))
    }

    /// All storage backends, or an error when the name list cannot be read.
    pub fn try_list_backends(&self) -> RegistryResult<Backends> {
        self.try_list(DATA_OBJECTS_SERVICE)
    }

    /// All storage backends, failing open to an empty map.
    pub fn list_backends(&self) -> Backends {
        self.try_list_backends()
            .unwrap_or_else(|e| fallback("storage backends", e))
    }

    /// Both collections. `fell_back` records whether either read failed.
    pub fn snapshot(&self) -> Snapshot {
        let mut fell_back = false;
        let data_sources = self.try_list_data_sources().unwrap_or_else(|e| {
            fell_back = true;
            fallback("data sources", e)
        });
        let backends = self.try_list_backends().unwrap_or_else(|e| {
            fell_back = true;
            fallback("storage backends", e)
        });
        Snapshot {
            data_sources,
            backends,
            fell_back,
        }
    }

    /// Persist the data source name list under the sync and index namespaces.
    pub fn save_source_names<I, N>(&self, names: I) -> RegistryResult<()>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let encoded = encode_names(names)?;
        self.store.set(&self.names_path(DATA_SYNC_SERVICE), encoded.clone())?;
        self.store.set(&self.names_path(DATA_INDEX_SERVICE), encoded)?;
        Ok(())
    }

    /// Persist the storage backend name list under the objects namespace.
    pub fn save_backend_names<I, N>(&self, names: I) -> RegistryResult<()>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let encoded = encode_names(names)?;
        self.store.set(&self.names_path(DATA_OBJECTS_SERVICE), encoded)
    }

    /// Write a data source record body. The name list is left untouched.
    pub fn save_data_source(&self, source: &DataSource) -> RegistryResult<()> {
        self.save_record(DATA_SYNC_SERVICE, &source.name, source)
    }

    /// Write a storage backend record body. The name list is left untouched.
    pub fn save_backend(&self, backend: &StorageBackend) -> RegistryResult<()> {
        self.save_record(DATA_OBJECTS_SERVICE, &backend.name, backend)
    }

    pub fn remove_data_source(&self, name: &str) -> RegistryResult<()> {
        self.store.delete(&self.record_path(DATA_SYNC_SERVICE, name))
    }

    pub fn remove_backend(&self, name: &str) -> RegistryResult<()> {
        self.store.delete(&self.record_path(DATA_OBJECTS_SERVICE, name))
    }

    fn save_record<T: Serialize>(
        &self,
        service: &str,
        name: &str,
        record: &T,
    ) -> RegistryResult<()> {
        let path = self.record_path(service, name);
        self.store.set(&path, serde_json::to_value(record)?)?;
        tracing::debug!(path = %path, "Registry record saved");
        Ok(())
    }

    fn try_list<T: DeserializeOwned>(&self, service: &str) -> RegistryResult<BTreeMap<String, T>> {
        let names_path = self.names_path(service);
        let raw = self
            .store
            .get(&names_path)?
            .ok_or_else(|| RegistryError::NotFound(names_path.clone()))?;
        let names = decode_names(&names_path, raw)?;

        let mut records = BTreeMap::new();
        for name in names {
            let path = self.record_path(service, &name);
            match self.store.get(&path) {
                Ok(Some(value)) => match serde_json::from_value::<T>(value) {
                    Ok(record) => {
                        records.insert(name, record);
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path,
                            error = %e,
                            "Skipping undecodable registry record"
                        );
                    }
                },
                Ok(None) => {
                    tracing::debug!(path = %path, "Listed record has no body, skipping");
                }
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Skipping unreadable registry record");
                }
            }
        }
        Ok(records)
    }
}

fn fallback<T: Default>(what: &str, err: RegistryError) -> T {
    match err {
        RegistryError::NotFound(_) => {
            tracing::debug!(collection = what, "Nothing configured yet, using empty fallback");
        }
        other => {
            tracing::warn!(
                collection = what,
                error = %other,
                "Registry read failed, using empty fallback"
            );
        }
    }
    T::default()
}

/// Names are written as a JSON-encoded string, sorted and deduplicated.
fn encode_names<I, N>(names: I) -> RegistryResult<Value>
where
    I: IntoIterator<Item = N>,
    N: AsRef<str>,
{
    let names: BTreeSet<String> = names
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .collect();
    let names: Vec<String> = names.into_iter().collect();
    Ok(Value::String(serde_json::to_string(&names)?))
}

/// Accepts either a JSON array of strings or a string holding one.
fn decode_names(path: &ConfigPath, raw: Value) -> RegistryResult<Vec<String>> {
    let decoded = match raw {
        Value::String(encoded) => serde_json::from_str::<Vec<String>>(&encoded),
        other => serde_json::from_value::<Vec<String>>(other),
    };
    decoded.map_err(|e| RegistryError::Decode {
        path: path.clone(),
        reason: e.to_string(),
    })
}
