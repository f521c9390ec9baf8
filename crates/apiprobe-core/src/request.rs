//! Request planning.
//!
//! Turns a test case into the one HTTP call it makes, without touching the
//! network.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::category::Category;
use crate::error::{CoreError, Result};
use crate::fixture::TestCase;

/// HTTP methods issued by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Lookup by id.
    Get,
    /// Command with a JSON body.
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// The HTTP request a test case produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestPlan {
    /// Request method.
    pub method: HttpMethod,
    /// Path relative to the base URL, always starting with `/`.
    pub path: String,
    /// JSON body, present for POST requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

/// Decide which request `case` issues for `category`.
///
/// User and product cases whose name contains `get` become
/// `GET {endpoint}/{id}`; everything else is `POST {endpoint}` with the
/// payload as body. The id is percent-encoded as a single path segment, so
/// `a/b` is sent as `a%2Fb`.
///
/// # Errors
///
/// Returns [`CoreError::MissingLookupId`] if a lookup case has no usable `id`.
pub fn plan_request(category: Category, case: &TestCase) -> Result<RequestPlan> {
    if category.supports_lookup() && case.is_lookup() {
        let id = case.lookup_id().ok_or_else(|| CoreError::MissingLookupId {
            case: case.name.clone(),
        })?;

        return Ok(RequestPlan {
            method: HttpMethod::Get,
            path: format!("{}/{}", category.endpoint(), encode_segment(&id)),
            body: None,
        });
    }

    Ok(RequestPlan {
        method: HttpMethod::Post,
        path: category.endpoint().to_string(),
        body: Some(case.payload.clone()),
    })
}

/// Percent-encode every byte outside the RFC 3986 unreserved set.
fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
