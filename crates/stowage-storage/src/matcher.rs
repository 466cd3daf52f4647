//! Predicates deciding whether an existing backend can be reused.
//!
//! The first matching backend in iteration order wins. Which one that is
//! must not matter: backends sharing a key tuple should never coexist.

use stowage_core::{Backends, StorageBackend, StorageType};

/// Gateway backend sharing `api_key` and `endpoint`, if any.
pub fn find_gateway<'a>(
    backends: &'a Backends,
    api_key: &str,
    endpoint: &str,
) -> Option<&'a StorageBackend> {
    backends.values().find(|backend| {
        backend.storage_type == StorageType::ObjectGateway
            && backend.api_key == api_key
            && backend.endpoint_url == endpoint
    })
}

/// Local backend serving `root_folder` on `peer_address`, if any.
pub fn find_local<'a>(
    backends: &'a Backends,
    peer_address: &str,
    root_folder: &str,
) -> Option<&'a StorageBackend> {
    backends.values().find(|backend| {
        backend.storage_type == StorageType::Local
            && backend.peer_address == peer_address
            && backend.local_folder == root_folder
    })
}
