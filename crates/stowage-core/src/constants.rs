//! Registry key layout.
//!
//! Records are addressed as `(category, namespace, [item])`. Name lists live
//! under the service namespace itself, record bodies under
//! `<namespace>.<record name>`.

/// Registry category holding every service configuration.
pub const SERVICES_CATEGORY: &str = "services";

/// Default prefix prepended to every service namespace.
pub const DEFAULT_NAMESPACE_PREFIX: &str = "stowage.grpc.";

/// Service owning data source records.
pub const DATA_SYNC_SERVICE: &str = "data.sync";

/// Service owning storage backend records.
pub const DATA_OBJECTS_SERVICE: &str = "data.objects";

/// Index service; it mirrors the data source name list.
pub const DATA_INDEX_SERVICE: &str = "data.index";

/// Key under a service namespace holding the JSON-encoded list of names.
pub const SOURCES_KEY: &str = "sources";

/// Configuration key holding a local data source folder.
pub const FOLDER_KEY: &str = "folder";

/// Configuration key holding an object gateway endpoint.
pub const CUSTOM_ENDPOINT_KEY: &str = "customEndpoint";

/// Maximum number of sanitized characters kept in an index table name.
pub const MAX_TABLE_NAME_STEM: usize = 50;

/// Default generated API key length.
pub const DEFAULT_API_KEY_LENGTH: usize = 16;

/// Default generated API secret length.
pub const DEFAULT_API_SECRET_LENGTH: usize = 24;
