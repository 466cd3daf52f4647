//! Data source model: the logical storage unit an administrator configures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{CUSTOM_ENDPOINT_KEY, FOLDER_KEY};
use crate::storage_types::StorageType;

/// A logical storage unit exposed to the platform.
///
/// `objects_service_name` binds it to a [`crate::StorageBackend`] once the
/// binder has run. Several data sources may share one backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", default)]
pub struct DataSource {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Data source name must be between 1 and 255 characters"
    ))]
    pub name: String,
    pub storage_type: StorageType,
    pub storage_configuration: HashMap<String, String>,
    pub api_key: String,
    pub api_secret: String,
    pub objects_service_name: String,
    pub objects_bucket: String,
    pub objects_port: u16,
    pub peer_address: String,
}

impl DataSource {
    /// New local data source serving `folder` on the node at `peer_address`.
    pub fn local(
        name: impl Into<String>,
        folder: impl Into<String>,
        peer_address: impl Into<String>,
    ) -> Self {
        let mut storage_configuration = HashMap::new();
        storage_configuration.insert(FOLDER_KEY.to_string(), folder.into());
        DataSource {
            name: name.into(),
            storage_type: StorageType::Local,
            storage_configuration,
            peer_address: peer_address.into(),
            ..Default::default()
        }
    }

    /// New object gateway data source using the given endpoint and credentials.
    pub fn gateway(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        let mut storage_configuration = HashMap::new();
        storage_configuration.insert(CUSTOM_ENDPOINT_KEY.to_string(), endpoint.into());
        DataSource {
            name: name.into(),
            storage_type: StorageType::ObjectGateway,
            storage_configuration,
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            ..Default::default()
        }
    }

    /// Configured folder for local sources, empty when absent.
    pub fn folder(&self) -> &str {
        self.storage_configuration
            .get(FOLDER_KEY)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Configured endpoint for gateway sources, empty when absent.
    pub fn custom_endpoint(&self) -> &str {
        self.storage_configuration
            .get(CUSTOM_ENDPOINT_KEY)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
