//! apiprobe HTTP dispatcher.
//!
//! This crate sends planned fixture requests to the server under test and
//! hands back the raw status and body. It never interprets the status code:
//! a `400` is as much an answer as a `200`, and only transport failures are
//! errors.
//!
//! # Example
//!
//! ```no_run
//! use apiprobe_client::ProbeClient;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), apiprobe_client::ClientError> {
//! let client = ProbeClient::new("http://127.0.0.1:14006")?;
//!
//! let response = client
//!     .post("/user", &json!({"command": "create", "id": 1, "username": "a"}))
//!     .await?;
//!
//! println!("{} {}", response.status, response.body);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, ProbeClient};
pub use error::ClientError;
pub use types::RawResponse;
