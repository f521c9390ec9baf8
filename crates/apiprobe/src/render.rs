//! Report rendering.

use serde_json::Value;
use std::io::{self, Write};

use apiprobe_core::{RunReport, Verdict};

use crate::error::RunError;

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable PASS/FAIL lines.
    #[default]
    Text,
    /// The full report as pretty-printed JSON.
    Json,
}

/// Write `report` to `out` in the requested format.
///
/// # Errors
///
/// Returns an error if writing or serialization fails.
pub fn render<W: Write>(
    report: &RunReport,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), RunError> {
    match format {
        OutputFormat::Text => render_text(report, out)?,
        OutputFormat::Json => render_json(report, out)?,
    }
    out.flush()?;
    Ok(())
}

/// Write the text report.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn render_text<W: Write>(report: &RunReport, out: &mut W) -> io::Result<()> {
    for category in &report.categories {
        writeln!(out)?;
        writeln!(
            out,
            "--- Running {} Tests ---",
            category.category.as_str().to_uppercase()
        )?;

        for outcome in &category.outcomes {
            writeln!(out, "[{}] {}", outcome.verdict.marker(), outcome.name)?;
            match outcome.verdict {
                Verdict::Pass => {}
                Verdict::Fail => {
                    writeln!(out, "   Expected: {}", display(outcome.expected.as_ref()))?;
                    writeln!(out, "   Actual:   {}", display(outcome.actual.as_ref()))?;
                    if let Some(status) = outcome.status {
                        writeln!(out, "   Status Code: {status}")?;
                    }
                }
                Verdict::Error => {
                    writeln!(
                        out,
                        "   Reason: {}",
                        outcome.error.as_deref().unwrap_or("unknown error")
                    )?;
                }
            }
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "{} passed, {} failed, {} errored ({} total)",
        report.passed(),
        report.failed(),
        report.errored(),
        report.total()
    )
}

/// Write the JSON report.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn render_json<W: Write>(report: &RunReport, out: &mut W) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out).map_err(serde_json::Error::io)
}

fn display(value: Option<&Value>) -> String {
    value.map_or_else(|| "null".to_string(), Value::to_string)
}
