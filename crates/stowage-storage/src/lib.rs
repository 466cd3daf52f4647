//! Stowage Storage Library
//!
//! Decides which storage backend a data source is served by.
//!
//! # Binding flow
//!
//! 1. The caller loads a snapshot of data sources and backends from the
//!    registry.
//! 2. Local data sources go through [`validate_data_source`] first.
//! 3. [`bind_backend`] reuses a compatible backend ([`matcher`]) or creates a
//!    new one named by [`namer`], and returns the updated data source.
//! 4. The caller persists the backend and the data source.
//!
//! # Serialization
//!
//! Nothing here locks the registry. Two bindings racing on the same snapshot
//! can each create a backend for what is a single physical root. Callers
//! must hold one lock around read snapshot, bind, persist, keyed by
//! `(peer address, root folder)` for local sources and
//! `(api key, endpoint)` for gateways, or route every binding through a
//! single writer.

pub mod binder;
pub mod credentials;
pub mod error;
pub mod location;
pub mod matcher;
pub mod namer;
pub mod orphans;

// Re-export commonly used types
pub use binder::{bind_backend, bind_backend_with, split_folder, Binding};
pub use credentials::CredentialPolicy;
pub use error::{LocationError, LocationResult};
pub use location::{validate_data_source, validate_location};
pub use namer::next_backend_name;
pub use orphans::find_unused_backend;
pub use stowage_core::{Backends, DataSource, DataSources, StorageBackend, StorageType};
