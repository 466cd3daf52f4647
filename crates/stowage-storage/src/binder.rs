//! Binding of data sources to storage backends.

use stowage_core::{Backends, DataSource, StorageBackend, StorageType};

use crate::credentials::CredentialPolicy;
use crate::matcher::{find_gateway, find_local};
use crate::namer::next_backend_name;

/// Result of binding a data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Backend serving the data source, reused or new.
    pub backend: StorageBackend,
    /// The data source carrying its binding and the backend credentials.
    pub source: DataSource,
    /// Whether `backend` is new and still has to be persisted.
    pub created: bool,
}

/// Bind `source` to a backend from `existing`, or to a new one.
///
/// Never fails: a local folder is expected to have gone through
/// [`crate::validate_data_source`] beforehand. `existing` is only read; the
/// caller persists `created` backends and the returned source.
pub fn bind_backend(existing: &Backends, source: DataSource) -> Binding {
    bind_backend_with(existing, source, &CredentialPolicy::default())
}

/// Same as [`bind_backend`], generating missing credentials with `policy`.
pub fn bind_backend_with(
    existing: &Backends,
    mut source: DataSource,
    policy: &CredentialPolicy,
) -> Binding {
    let (backend, created) = match source.storage_type {
        StorageType::ObjectGateway => bind_gateway(existing, &mut source),
        StorageType::Local => bind_local(existing, &mut source, policy),
    };

    source.objects_service_name = backend.name.clone();

    Binding {
        backend,
        source,
        created,
    }
}

/// Split a local folder into its root folder and bucket name at the final
/// separator. Trailing separators are stripped from the root.
///
/// `/data/nodeA/bucket1` gives `("/data/nodeA", "bucket1")`.
pub fn split_folder(folder: &str) -> (&str, &str) {
    match folder.rfind(std::path::is_separator) {
        Some(idx) => (
            folder[..idx].trim_end_matches(std::path::is_separator),
            &folder[idx + 1..],
        ),
        None => ("", folder),
    }
}

fn bind_gateway(existing: &Backends, source: &mut DataSource) -> (StorageBackend, bool) {
    let endpoint = source.custom_endpoint().to_string();

    if let Some(found) = find_gateway(existing, &source.api_key, &endpoint) {
        tracing::debug!(
            data_source = %source.name,
            backend = %found.name,
            "Reusing gateway backend"
        );
        source.api_key = found.api_key.clone();
        source.api_secret = found.api_secret.clone();
        return (found.clone(), false);
    }

    let backend = StorageBackend {
        name: next_backend_name(existing, StorageType::ObjectGateway),
        storage_type: StorageType::ObjectGateway,
        api_key: source.api_key.clone(),
        api_secret: source.api_secret.clone(),
        endpoint_url: endpoint,
        running_port: source.objects_port,
        ..Default::default()
    };

    tracing::info!(
        data_source = %source.name,
        backend = %backend.name,
        endpoint = %backend.endpoint_url,
        "New gateway backend"
    );
    (backend, true)
}

fn bind_local(
    existing: &Backends,
    source: &mut DataSource,
    policy: &CredentialPolicy,
) -> (StorageBackend, bool) {
    let (root, bucket) = split_folder(source.folder());
    let (root, bucket) = (root.to_string(), bucket.to_string());

    let resolved = match find_local(existing, &source.peer_address, &root) {
        Some(found) => {
            tracing::debug!(
                data_source = %source.name,
                backend = %found.name,
                root_folder = %root,
                "Reusing local backend"
            );
            source.api_key = found.api_key.clone();
            source.api_secret = found.api_secret.clone();
            (found.clone(), false)
        }
        None => {
            if source.api_key.is_empty() {
                let (api_key, api_secret) = policy.generate();
                source.api_key = api_key;
                source.api_secret = api_secret;
            }

            let backend = StorageBackend {
                name: next_backend_name(existing, StorageType::Local),
                storage_type: StorageType::Local,
                api_key: source.api_key.clone(),
                api_secret: source.api_secret.clone(),
                local_folder: root,
                running_port: source.objects_port,
                peer_address: source.peer_address.clone(),
                ..Default::default()
            };

            tracing::info!(
                data_source = %source.name,
                backend = %backend.name,
                root_folder = %backend.local_folder,
                peer_address = %backend.peer_address,
                "New local backend"
            );
            (backend, true)
        }
    };

    source.objects_bucket = bucket;
    resolved
}
