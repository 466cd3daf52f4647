//! Configuration store contract
//!
//! The registry's transport and persistence are owned elsewhere; this crate
//! only needs to read a value at a path and write one back.

use std::sync::RwLock;

use serde_json::Value;

use crate::error::{RegistryError, RegistryResult};
use crate::path::ConfigPath;
use crate::tree::ConfigTree;

/// Hierarchical configuration store.
pub trait ConfigStore: Send + Sync {
    /// Read the value at `path`, `None` when nothing is stored there.
    fn get(&self, path: &ConfigPath) -> RegistryResult<Option<Value>>;

    /// Write `value` at `path`, creating missing parents.
    fn set(&self, path: &ConfigPath, value: Value) -> RegistryResult<()>;

    /// Remove the value at `path`. Removing a missing value is not an error.
    fn delete(&self, path: &ConfigPath) -> RegistryResult<()>;
}

impl<T: ConfigStore + ?Sized> ConfigStore for &T {
    fn get(&self, path: &ConfigPath) -> RegistryResult<Option<Value>> {
        (**self).get(path)
    }

    fn set(&self, path: &ConfigPath, value: Value) -> RegistryResult<()> {
        (**self).set(path, value)
    }

    fn delete(&self, path: &ConfigPath) -> RegistryResult<()> {
        (**self).delete(path)
    }
}

/// In-memory store, used by tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    tree: RwLock<ConfigTree>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from a JSON document shaped `{category: {namespace: ...}}`.
    pub fn from_json(document: Value) -> RegistryResult<Self> {
        let tree = ConfigTree::from_value(document).ok_or_else(|| RegistryError::Decode {
            path: ConfigPath::namespace("", ""),
            reason: "registry document must be a JSON object".to_string(),
        })?;
        Ok(MemoryConfigStore {
            tree: RwLock::new(tree),
        })
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, path: &ConfigPath) -> RegistryResult<Option<Value>> {
        let tree = self.tree.read().map_err(|_| RegistryError::Poisoned)?;
        Ok(tree.get(path).cloned())
    }

    fn set(&self, path: &ConfigPath, value: Value) -> RegistryResult<()> {
        let mut tree = self.tree.write().map_err(|_| RegistryError::Poisoned)?;
        tree.set(path, value);
        Ok(())
    }

    fn delete(&self, path: &ConfigPath) -> RegistryResult<()> {
        let mut tree = self.tree.write().map_err(|_| RegistryError::Poisoned)?;
        tree.delete(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_store_round_trips_values() {
        let store = MemoryConfigStore::new();
        let path = ConfigPath::item("services", "ns", "sources");

        assert_eq!(store.get(&path).unwrap(), None);
        store.set(&path, json!(["a", "b"])).unwrap();
        assert_eq!(store.get(&path).unwrap(), Some(json!(["a", "b"])));

        store.delete(&path).unwrap();
        store.delete(&path).unwrap();
        assert_eq!(store.get(&path).unwrap(), None);
    }

    #[test]
    fn from_json_rejects_arrays() {
        assert!(MemoryConfigStore::from_json(json!([])).is_err());
    }
}
