use std::collections::BTreeMap;

pub mod data_source;
pub mod storage_backend;

pub use data_source::DataSource;
pub use storage_backend::StorageBackend;

/// Data sources keyed by name.
pub type DataSources = BTreeMap<String, DataSource>;

/// Storage backends keyed by name.
pub type Backends = BTreeMap<String, StorageBackend>;
