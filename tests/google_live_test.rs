//! The default suite against the real search engine
//!
//! Ignored by default: needs a browser and network access, and the outcome
//! depends on the engine's current markup and ranking.

use search_probe::{OperandSource, ProbeConfig, Scenario, SearchSession, run_suite};

#[tokio::test]
#[ignore] // Requires browser installation and network access
async fn test_default_suite_against_google() {
    let _ = search_probe::logging::init_tracing();
    let config = ProbeConfig::from_env().unwrap();
    let mut operands = OperandSource::new(config.seed(), config.math_operand_bound());
    let scenarios = Scenario::default_suite(&config, &mut operands);

    let session = SearchSession::open(&config).await.unwrap();
    let report = run_suite(session.driver(), config.selectors(), &scenarios).await;
    session.shutdown().await;

    assert_eq!(report.scenarios.len(), scenarios.len());
    let failures: Vec<_> = report.scenarios.iter().filter(|r| !r.passed()).collect();
    assert!(
        failures.is_empty(),
        "seed {}: {failures:#?}",
        operands.seed()
    );
}
