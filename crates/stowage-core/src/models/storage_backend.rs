//! Storage backend model: the configuration of a process that serves bytes.

use serde::{Deserialize, Serialize};

use crate::storage_types::StorageType;

/// A physical backend serving one or more data sources.
///
/// `name` is the registry primary key. Backends carry no back-reference to
/// their data sources; membership is found by scanning data sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StorageBackend {
    pub name: String,
    pub storage_type: StorageType,
    pub api_key: String,
    pub api_secret: String,
    /// Gateway endpoint; empty for local backends.
    pub endpoint_url: String,
    /// Root directory served; empty for gateways.
    pub local_folder: String,
    pub running_port: u16,
    pub peer_address: String,
}
