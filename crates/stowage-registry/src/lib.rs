//! Stowage Registry Library
//!
//! Access to the hierarchical configuration registry holding data source and
//! storage backend records.
//!
//! # Key layout
//!
//! Values are addressed by `(category, namespace, [item])`:
//!
//! - `services/<prefix>data.sync` item `sources`: JSON-encoded data source names
//! - `services/<prefix>data.index` item `sources`: mirror of the above
//! - `services/<prefix>data.objects` item `sources`: JSON-encoded backend names
//! - `services/<prefix>data.sync.<name>`: data source record body
//! - `services/<prefix>data.objects.<name>`: storage backend record body
//!
//! Reads fail open: when the registry cannot be read the accessor reports an
//! empty configuration instead of an error, so a node can bootstrap against
//! an empty or missing registry.

pub mod accessor;
pub mod error;
pub mod file;
pub mod path;
pub mod store;
mod tree;

pub use accessor::{Backends, DataSources, Registry, Snapshot};
pub use error::{RegistryError, RegistryResult};
pub use file::JsonFileConfigStore;
pub use path::ConfigPath;
pub use store::{ConfigStore, MemoryConfigStore};
