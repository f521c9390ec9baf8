//! apiprobe - JSON fixture runner for REST services.
//!
//! Loads request/expected-response fixtures per category, sends each request
//! to the server under test and reports which responses match.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod runner;
pub mod telemetry;

pub use cli::{exit_code, Cli};
pub use config::{base_url_from_service_config, RunnerConfig};
pub use error::{ConfigError, RunError};
pub use render::{render, OutputFormat};
pub use runner::SuiteRunner;
pub use telemetry::init_tracing;
