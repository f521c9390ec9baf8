//! Client error types.

/// Errors that can occur when dispatching fixture requests.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
