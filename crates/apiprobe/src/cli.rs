//! Command-line interface.

use clap::Parser;
use std::path::PathBuf;

use apiprobe_core::{Category, RunReport};

use crate::config::{
    base_url_from_service_config, RunnerConfig, DEFAULT_BASE_URL, DEFAULT_PAYLOADS_DIR,
    DEFAULT_RESPONSES_DIR, DEFAULT_SERVICE, DEFAULT_TIMEOUT_SECONDS,
};
use crate::error::{ConfigError, RunError};
use crate::render::OutputFormat;

const LONG_ABOUT: &str = r#"apiprobe sends JSON fixtures to a running REST service and diffs the responses.

FIXTURES:
    For each category (user, product, order) two files are read:
        {payloads-dir}/{category}_testcases.json   request payloads by test name
        {responses-dir}/{category}_responses.json  expected responses by test name

    User and product cases whose name contains "get" are sent as
    GET /{category}/{id}; every other case is POSTed to /{category}.

    Fields such as "id" are dropped from the actual response when the
    expected response does not mention them (see --ignore-field).

EXIT STATUS:
    0  every case passed
    1  at least one case failed or errored
    2  the run could not start (bad config, unreadable fixtures)

EXAMPLES:
    apiprobe
    apiprobe --base-url http://127.0.0.1:14000 -c user,product
    apiprobe --service-config config.json --format json"#;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "apiprobe")]
#[command(author, version)]
#[command(about = "Run JSON request/response fixtures against a REST service")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    /// Base URL of the server under test (takes precedence over --service-config)
    #[arg(long, env = "APIPROBE_BASE_URL")]
    pub base_url: Option<String>,

    /// Service config.json to read the server address from
    #[arg(long, env = "APIPROBE_SERVICE_CONFIG")]
    pub service_config: Option<PathBuf>,

    /// Entry in the service config holding the address
    #[arg(long, default_value = DEFAULT_SERVICE)]
    pub service: String,

    /// Directory containing {category}_testcases.json files
    #[arg(long, env = "APIPROBE_PAYLOADS_DIR", default_value = DEFAULT_PAYLOADS_DIR)]
    pub payloads_dir: PathBuf,

    /// Directory containing {category}_responses.json files
    #[arg(long, env = "APIPROBE_RESPONSES_DIR", default_value = DEFAULT_RESPONSES_DIR)]
    pub responses_dir: PathBuf,

    /// Categories to run, in order (default: user,product,order)
    #[arg(short = 'c', long = "category", value_delimiter = ',', value_parser = parse_category)]
    pub categories: Vec<Category>,

    /// Response field to ignore when the expectation omits it (repeatable)
    #[arg(long = "ignore-field", value_name = "FIELD", default_value = "id")]
    pub ignore_fields: Vec<String>,

    /// Compare responses exactly, ignoring no fields
    #[arg(long, conflicts_with = "ignore_fields")]
    pub no_ignore: bool,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "APIPROBE_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_SECONDS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the arguments into a runner configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a service config file is given and cannot be used.
    pub fn to_config(&self) -> Result<RunnerConfig, ConfigError> {
        let base_url = match (&self.base_url, &self.service_config) {
            (Some(url), _) => url.clone(),
            (None, Some(path)) => base_url_from_service_config(path, &self.service)?,
            (None, None) => DEFAULT_BASE_URL.to_string(),
        };

        let categories = if self.categories.is_empty() {
            Category::ALL.to_vec()
        } else {
            self.categories.clone()
        };

        let ignore_fields = if self.no_ignore {
            Vec::new()
        } else {
            self.ignore_fields.clone()
        };

        Ok(RunnerConfig::new()
            .with_base_url(base_url)
            .with_payloads_dir(&self.payloads_dir)
            .with_responses_dir(&self.responses_dir)
            .with_categories(categories)
            .with_ignore_fields(ignore_fields)
            .with_timeout(self.timeout))
    }
}

/// Process exit status for the outcome of a run.
///
/// `0` when every case passed, `1` when any case failed or errored, and `2`
/// when the run could not start.
#[must_use]
pub fn exit_code(result: &Result<RunReport, RunError>) -> u8 {
    match result {
        Ok(report) if report.success() => 0,
        Ok(_) => 1,
        Err(_) => 2,
    }
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse().map_err(|e: apiprobe_core::CoreError| e.to_string())
}
