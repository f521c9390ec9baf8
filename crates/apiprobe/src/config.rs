//! Runner configuration.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use apiprobe_core::{Category, IgnorePolicy};

use crate::error::ConfigError;

/// Address of the order service gateway in the stock deployment.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:14006";

/// Default directory holding `{category}_testcases.json` files.
pub const DEFAULT_PAYLOADS_DIR: &str = "testcases/payloads";

/// Default directory holding `{category}_responses.json` files.
pub const DEFAULT_RESPONSES_DIR: &str = "testcases/responses";

/// Service entry read from a service config file by default.
pub const DEFAULT_SERVICE: &str = "OrderService";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Everything a run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Base URL of the server under test.
    pub base_url: String,

    /// Directory with request payload files.
    pub payloads_dir: PathBuf,

    /// Directory with expected response files.
    pub responses_dir: PathBuf,

    /// Categories to run, in order.
    pub categories: Vec<Category>,

    /// Top-level fields ignored when the expectation omits them.
    pub ignore_fields: Vec<String>,

    /// Per-request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            payloads_dir: DEFAULT_PAYLOADS_DIR.into(),
            responses_dir: DEFAULT_RESPONSES_DIR.into(),
            categories: Category::ALL.to_vec(),
            ignore_fields: vec!["id".into()],
            request_timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl RunnerConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the payloads directory.
    #[must_use]
    pub fn with_payloads_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.payloads_dir = dir.into();
        self
    }

    /// Set the responses directory.
    #[must_use]
    pub fn with_responses_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.responses_dir = dir.into();
        self
    }

    /// Set the categories to run.
    #[must_use]
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    /// Set the ignored fields.
    #[must_use]
    pub fn with_ignore_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_seconds = seconds;
        self
    }

    /// The comparison policy derived from `ignore_fields`.
    #[must_use]
    pub fn ignore_policy(&self) -> IgnorePolicy {
        IgnorePolicy::new(self.ignore_fields.iter().cloned())
    }
}

/// A service entry in a service config file.
#[derive(Debug, Deserialize)]
struct ServiceEndpoint {
    ip: String,
    port: PortValue,
}

/// Ports appear both as numbers and as strings in the wild.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(u64),
    Text(String),
}

impl PortValue {
    fn as_port(&self) -> Option<u16> {
        let port = match self {
            Self::Number(n) => u16::try_from(*n).ok(),
            Self::Text(s) => s.trim().parse().ok(),
        };
        port.filter(|p| *p != 0)
    }

    fn raw(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Read `http://{ip}:{port}` for `service` from a service config file.
///
/// The file is a JSON object keyed by service name:
///
/// ```json
/// { "OrderService": { "ip": "127.0.0.1", "port": 14000 } }
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, the service is
/// missing, or its port is not a valid TCP port.
pub fn base_url_from_service_config(path: &Path, service: &str) -> Result<String, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let services: Map<String, Value> =
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let entry = services
        .get(service)
        .cloned()
        .ok_or_else(|| ConfigError::MissingService {
            path: path.to_path_buf(),
            service: service.to_string(),
        })?;
    let endpoint: ServiceEndpoint =
        serde_json::from_value(entry).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let Some(port) = endpoint.port.as_port() else {
        return Err(ConfigError::InvalidPort {
            service: service.to_string(),
            value: endpoint.port.raw(),
        });
    };

    tracing::debug!(
        path = %path.display(),
        service,
        ip = %endpoint.ip,
        port,
        "Resolved service address"
    );

    Ok(format!("http://{}:{port}", endpoint.ip))
}
