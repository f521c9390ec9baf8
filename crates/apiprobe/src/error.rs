//! Runner error types.

use std::path::PathBuf;

use apiprobe_client::ClientError;
use apiprobe_core::CoreError;

/// Errors raised while resolving the runner configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The service config file could not be read.
    #[error("failed to read service config {path}: {source}")]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The service config file is not valid JSON or has the wrong shape.
    #[error("failed to parse service config {path}: {source}")]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The requested service has no entry in the config file.
    #[error("service {service} not found in {path}")]
    MissingService {
        /// Config file path.
        path: PathBuf,
        /// Service name that was looked up.
        service: String,
    },

    /// The service entry has a port that is not a valid TCP port.
    #[error("invalid port for service {service}: {value}")]
    InvalidPort {
        /// Service name.
        service: String,
        /// The offending value.
        value: String,
    },
}

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Fixtures could not be loaded.
    #[error(transparent)]
    Fixtures(#[from] CoreError),

    /// The HTTP client could not be built.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),

    /// Serializing the JSON report failed.
    #[error("failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}
