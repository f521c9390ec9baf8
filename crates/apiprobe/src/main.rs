//! apiprobe - runs JSON fixtures against a REST service.

use std::process::ExitCode;

use clap::Parser;

use apiprobe::{exit_code, init_tracing, render, Cli, RunError, SuiteRunner};
use apiprobe_core::RunReport;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(&cli).await;
    if let Err(e) = &result {
        eprintln!("error: {e}");
    }
    ExitCode::from(exit_code(&result))
}

async fn run(cli: &Cli) -> Result<RunReport, RunError> {
    let config = cli.to_config()?;

    tracing::info!(
        base_url = %config.base_url,
        payloads_dir = %config.payloads_dir.display(),
        responses_dir = %config.responses_dir.display(),
        categories = ?config.categories,
        ignore_fields = ?config.ignore_fields,
        "Configuration loaded"
    );

    let runner = SuiteRunner::new(config)?;
    let report = runner.run().await?;

    let stdout = std::io::stdout();
    render(&report, cli.format, &mut stdout.lock())?;

    Ok(report)
}
