// Runs the built-in probe suite against the configured search page.
//
// Configuration comes from SEARCH_PROBE_* environment variables; the JSON
// report goes to stdout and the exit code is non-zero if any scenario failed.

use anyhow::{Context, Result};
use search_probe::{OperandSource, ProbeConfig, Scenario, SearchSession, logging, run_suite};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    logging::init_tracing();

    let config = ProbeConfig::from_env().context("Invalid probe configuration")?;
    let mut operands = OperandSource::new(config.seed(), config.math_operand_bound());
    let scenarios = Scenario::default_suite(&config, &mut operands);

    let session = SearchSession::open(&config).await?;
    let mut report = run_suite(session.driver(), config.selectors(), &scenarios).await;
    report.seed = Some(operands.seed());
    session.shutdown().await;

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to serialize report")?
    );

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
