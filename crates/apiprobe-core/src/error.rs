//! Error types for apiprobe.

use std::path::PathBuf;

/// Result type for apiprobe core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while loading fixtures or planning requests.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A fixture file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A fixture file is not valid JSON.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// The file that failed.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A fixture file parsed but does not have the expected shape.
    #[error("invalid fixture file {path}: {reason}")]
    InvalidFixtureFile {
        /// The offending file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// Category name not recognised.
    #[error("unknown category: {0} (expected one of: user, product, order)")]
    UnknownCategory(String),

    /// A lookup case has no usable `id` in its payload.
    #[error("test case {case} is a lookup but its payload has no usable id")]
    MissingLookupId {
        /// The test case name.
        case: String,
    },
}
