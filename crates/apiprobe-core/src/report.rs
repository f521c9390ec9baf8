//! Run results.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::category::Category;
use crate::compare::{Comparison, FieldDiff};

/// Result of a single test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// The response matched the expectation.
    Pass,
    /// The server answered but the response did not match.
    Fail,
    /// The request could not be planned or sent.
    Error,
}

impl Verdict {
    /// Marker used in text output.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Error => "ERROR",
        }
    }
}

/// Outcome of one test case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseOutcome {
    /// Test case name.
    pub name: String,
    /// Pass, fail or error.
    pub verdict: Verdict,
    /// HTTP status code, when a response was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Expected response, if the fixture had one.
    pub expected: Option<Value>,
    /// Actual response after the ignore policy, when a response was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
    /// Top-level differences for failed cases.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub differences: Vec<FieldDiff>,
    /// Error description for errored cases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock time spent on the request.
    pub elapsed_ms: u64,
}

impl CaseOutcome {
    /// Build the outcome of a case whose response was compared.
    ///
    /// A body that was not JSON is noted in `error`; the verdict stays `Fail`.
    #[must_use]
    pub fn compared(
        name: impl Into<String>,
        status: u16,
        expected: Option<Value>,
        comparison: Comparison,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            name: name.into(),
            verdict: if comparison.matches {
                Verdict::Pass
            } else {
                Verdict::Fail
            },
            status: Some(status),
            expected,
            actual: Some(comparison.actual),
            differences: comparison.differences,
            error: (!comparison.body_is_json).then(|| "response body is not JSON".to_string()),
            elapsed_ms,
        }
    }

    /// Build the outcome of a case that never got a response.
    #[must_use]
    pub fn errored(
        name: impl Into<String>,
        expected: Option<Value>,
        error: impl Into<String>,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            name: name.into(),
            verdict: Verdict::Error,
            status: None,
            expected,
            actual: None,
            differences: Vec::new(),
            error: Some(error.into()),
            elapsed_ms,
        }
    }

    /// Whether the case passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }
}

/// Outcomes of one category, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    /// The category that ran.
    pub category: Category,
    /// Per-case outcomes.
    pub outcomes: Vec<CaseOutcome>,
}

impl CategoryReport {
    /// Create an empty report for `category`.
    #[must_use]
    pub fn new(category: Category) -> Self {
        Self {
            category,
            outcomes: Vec::new(),
        }
    }

    /// Number of passed cases.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(Verdict::Pass)
    }

    /// Number of failed cases.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(Verdict::Fail)
    }

    /// Number of errored cases.
    #[must_use]
    pub fn errored(&self) -> usize {
        self.count(Verdict::Error)
    }

    fn count(&self, verdict: Verdict) -> usize {
        self.outcomes.iter().filter(|o| o.verdict == verdict).count()
    }
}

/// Results of a whole run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Server the requests were sent to.
    pub base_url: String,
    /// Per-category reports, in execution order.
    pub categories: Vec<CategoryReport>,
}

impl RunReport {
    /// Start a new, empty report.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            started_at: Utc::now(),
            base_url: base_url.into(),
            categories: Vec::new(),
        }
    }

    /// Total number of cases.
    #[must_use]
    pub fn total(&self) -> usize {
        self.categories.iter().map(|c| c.outcomes.len()).sum()
    }

    /// Total number of passed cases.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.categories.iter().map(CategoryReport::passed).sum()
    }

    /// Total number of failed cases.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.categories.iter().map(CategoryReport::failed).sum()
    }

    /// Total number of errored cases.
    #[must_use]
    pub fn errored(&self) -> usize {
        self.categories.iter().map(CategoryReport::errored).sum()
    }

    /// Whether every case passed.
    #[must_use]
    pub fn success(&self) -> bool {
        self.passed() == self.total()
    }
}
