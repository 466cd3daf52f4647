//! Stowage Core Library
//!
//! This crate provides the domain models, error types, configuration and
//! registry key layout shared by every Stowage component.

pub mod config;
pub mod constants;
pub mod error;
pub mod index_tables;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::StowageConfig;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use index_tables::{index_table_names, IndexTableNames};
pub use models::{Backends, DataSource, DataSources, StorageBackend};
pub use storage_types::StorageType;
