//! apiprobe HTTP client implementation.

use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use apiprobe_core::{HttpMethod, RequestPlan};

use crate::error::ClientError;
use crate::types::RawResponse;

/// Client that sends fixture requests to the server under test.
#[derive(Debug, Clone)]
pub struct ProbeClient {
    client: Client,
    base_url: String,
}

impl ProbeClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the server under test (e.g., `"http://127.0.0.1:14006"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let parsed = Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base URL {base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "base URL must use http or https: {base_url}"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .user_agent(options.user_agent)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Base URL requests are sent to, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a planned request.
    ///
    /// # Errors
    ///
    /// Returns an error only if no response was received. Non-2xx statuses
    /// are returned as normal responses.
    #[instrument(skip(self, plan), fields(method = %plan.method, path = %plan.path))]
    pub async fn execute(&self, plan: &RequestPlan) -> Result<RawResponse, ClientError> {
        let url = format!("{}{}", self.base_url, plan.path);

        let request = match plan.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        let request = match &plan.body {
            Some(body) => request.json(body),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, bytes = body.len(), "Received response");

        Ok(RawResponse { status, body })
    }

    /// Send `GET {path}`.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    pub async fn get(&self, path: &str) -> Result<RawResponse, ClientError> {
        self.execute(&RequestPlan {
            method: HttpMethod::Get,
            path: path.to_string(),
            body: None,
        })
        .await
    }

    /// Send `POST {path}` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    pub async fn post(&self, path: &str, body: &Value) -> Result<RawResponse, ClientError> {
        self.execute(&RequestPlan {
            method: HttpMethod::Post,
            path: path.to_string(),
            body: Some(body.clone()),
        })
        .await
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: concat!("apiprobe/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientOptions {
    /// Create options with a request timeout.
    #[must_use]
    pub fn with_timeout(timeout_seconds: u64) -> Self {
        Self {
            timeout_seconds,
            ..Self::default()
        }
    }
}
