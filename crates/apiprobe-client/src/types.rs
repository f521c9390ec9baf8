//! Response types for the apiprobe client.

use serde::Serialize;

/// A response as received from the server, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text; empty when the server sent none.
    pub body: String,
}

impl RawResponse {
    /// Whether the status code is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
