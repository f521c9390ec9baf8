//! Sequential fixture runner.

use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use apiprobe_client::{ClientOptions, ProbeClient};
use apiprobe_core::{
    compare, load_category, normalize_body, plan_request, CaseOutcome, Category, CategoryReport,
    Fixture, FixtureSet, IgnorePolicy, RunReport,
};

use crate::config::RunnerConfig;
use crate::error::RunError;

/// Runs fixture categories against the server under test, one request at a time.
#[derive(Debug, Clone)]
pub struct SuiteRunner {
    client: ProbeClient,
    config: RunnerConfig,
    policy: IgnorePolicy,
}

impl SuiteRunner {
    /// Create a runner for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built for the base URL.
    pub fn new(config: RunnerConfig) -> Result<Self, RunError> {
        let client = ProbeClient::with_options(
            config.base_url.clone(),
            ClientOptions::with_timeout(config.request_timeout_seconds),
        )?;
        let policy = config.ignore_policy();

        Ok(Self {
            client,
            config,
            policy,
        })
    }

    /// The configuration this runner was built with.
    #[must_use]
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run every configured category in order.
    ///
    /// All fixtures are loaded before the first request is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if a category's fixtures cannot be loaded. Failures
    /// of individual requests are recorded in the report instead.
    #[instrument(skip(self), fields(base_url = %self.client.base_url()))]
    pub async fn run(&self) -> Result<RunReport, RunError> {
        let sets = self
            .config
            .categories
            .iter()
            .map(|&category| self.load(category))
            .collect::<Result<Vec<_>, _>>()?;

        let mut report = RunReport::new(self.client.base_url());
        for set in &sets {
            report.categories.push(self.run_set(set).await);
        }

        info!(
            total = report.total(),
            passed = report.passed(),
            failed = report.failed(),
            errored = report.errored(),
            "Run complete"
        );
        Ok(report)
    }

    /// Load and run the fixtures of one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixtures cannot be loaded.
    pub async fn run_category(&self, category: Category) -> Result<CategoryReport, RunError> {
        let set = self.load(category)?;
        Ok(self.run_set(&set).await)
    }

    /// Run already loaded fixtures in file order.
    #[instrument(skip(self, set), fields(category = %set.category))]
    pub async fn run_set(&self, set: &FixtureSet) -> CategoryReport {
        info!(cases = set.len(), "Running category");

        let mut report = CategoryReport::new(set.category);
        for fixture in &set.fixtures {
            report.outcomes.push(self.run_case(set.category, fixture).await);
        }
        report
    }

    fn load(&self, category: Category) -> Result<FixtureSet, RunError> {
        let set = load_category(
            &self.config.payloads_dir,
            &self.config.responses_dir,
            category,
        )?;
        debug!(%category, cases = set.len(), "Loaded fixtures");
        Ok(set)
    }

    /// Send one fixture's request and compare the response.
    #[instrument(skip(self, fixture), fields(case = %fixture.case.name))]
    pub async fn run_case(&self, category: Category, fixture: &Fixture) -> CaseOutcome {
        let started = Instant::now();
        let name = fixture.case.name.clone();

        let plan = match plan_request(category, &fixture.case) {
            Ok(plan) => plan,
            Err(e) => {
                warn!(error = %e, "Cannot build request");
                return CaseOutcome::errored(
                    name,
                    fixture.expected.clone(),
                    e.to_string(),
                    elapsed_ms(started),
                );
            }
        };

        let response = match self.client.execute(&plan).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, method = %plan.method, path = %plan.path, "Request failed");
                return CaseOutcome::errored(
                    name,
                    fixture.expected.clone(),
                    e.to_string(),
                    elapsed_ms(started),
                );
            }
        };

        let comparison = compare(
            fixture.expected.as_ref(),
            normalize_body(&response.body),
            &self.policy,
        );
        debug!(
            status = response.status,
            matches = comparison.matches,
            differences = comparison.differences.len(),
            "Compared response"
        );

        CaseOutcome::compared(
            name,
            response.status,
            fixture.expected.clone(),
            comparison,
            elapsed_ms(started),
        )
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
