//! Error types module
//!
//! `AppError` is the application-level error every Stowage crate converts
//! into at its outer boundary. Crate-specific errors (`LocationError`,
//! `RegistryError`) stay close to the code raising them and provide `From`
//! conversions into this type.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected failures such as lookups of records that do not exist
    Debug,
    /// Rejected input the operator can correct
    Warn,
    /// Unexpected failures
    Error,
}

/// Describes how an error should be presented to the caller.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "INSUFFICIENT_DEPTH")
    fn error_code(&self) -> &'static str;

    /// Whether the caller can fix the input and retry
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the caller
    fn suggested_action(&self) -> Option<&'static str>;

    /// Caller-facing message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;

    /// Process exit code used by command-line callers
    fn exit_code(&self) -> i32;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Folder is not nested deeply enough: {0}")]
    InsufficientDepth(String),

    #[error("Parent folder is not writable: {0}")]
    NotWritable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Static metadata per variant: (error_code, recoverable, suggested_action, log_level, exit_code).
fn app_error_static_metadata(
    err: &AppError,
) -> (&'static str, bool, Option<&'static str>, LogLevel, i32) {
    match err {
        AppError::FolderNotFound(_) => (
            "FOLDER_NOT_FOUND",
            true,
            Some("Create the folder or pick an existing one"),
            LogLevel::Warn,
            2,
        ),
        AppError::InsufficientDepth(_) => (
            "INSUFFICIENT_DEPTH",
            true,
            Some("Use a folder at least two levels deep"),
            LogLevel::Warn,
            2,
        ),
        AppError::NotWritable(_) => (
            "NOT_WRITABLE",
            true,
            Some("Make sure the parent folder is writable by the application"),
            LogLevel::Warn,
            2,
        ),
        AppError::InvalidInput(_) => (
            "INVALID_INPUT",
            true,
            Some("Check the data source parameters and try again"),
            LogLevel::Warn,
            2,
        ),
        AppError::NotFound(_) => (
            "NOT_FOUND",
            true,
            Some("Verify the record name exists"),
            LogLevel::Debug,
            3,
        ),
        AppError::Registry(_) => (
            "REGISTRY_ERROR",
            true,
            Some("Retry after checking the registry location"),
            LogLevel::Error,
            4,
        ),
        AppError::Config(_) => (
            "CONFIG_ERROR",
            true,
            Some("Check the STOWAGE_* environment variables"),
            LogLevel::Error,
            5,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => {
            ("INTERNAL_ERROR", false, None, LogLevel::Error, 1)
        }
    }
}

impl AppError {
    /// Detailed message including the source chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn exit_code(&self) -> i32 {
        app_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            AppError::FolderNotFound(path) => format!("Folder {} does not exist", path),
            AppError::InsufficientDepth(_) => {
                "Please use at least a two-levels deep folder".to_string()
            }
            AppError::NotWritable(_) => {
                "Please make sure that parent folder is writeable by the application".to_string()
            }
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::Registry(_) => "Failed to access the configuration registry".to_string(),
            AppError::Config(ref msg) => msg.clone(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal error".to_string()
            }
        }
    }
}
