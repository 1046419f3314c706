//! Suite runner end to end against a scripted page

mod common;

use common::{ResultsPage, ScriptedPage};
use search_probe::{
    MathQuery, OperandSource, Operator, Outcome, ProbeConfig, ProbeError, ResultPredicate,
    Scenario, SearchQuery, Selectors, run_math_check, run_scenario, run_suite,
};

/// A page that answers every query in the default suite correctly
fn cooperative_page(scenarios: &[Scenario]) -> ScriptedPage {
    let mut page = ScriptedPage::new()
        .respond(
            "jest puppeteer",
            ResultsPage::with_links(
                &(0..10)
                    .map(|i| format!("https://site{i}.example/jest"))
                    .collect::<Vec<_>>(),
            ),
        )
        .respond(
            "site:medium.com jest",
            ResultsPage::with_links(&[
                "https://medium.com/@a/testing-with-jest",
                "https://medium.com/p/jest-puppeteer",
            ]),
        )
        .respond(
            "filetype:pdf javascript",
            ResultsPage::with_links(&[
                "https://example.edu/js/intro.pdf",
                "https://cs.example.org/lectures/javascript.pdf",
            ]),
        )
        .respond(
            "inurl:article javascript",
            ResultsPage::with_links(&[
                "https://example.com/article/js",
                "https://news.example/Articles/JavaScript-2020",
            ]),
        );

    for scenario in scenarios {
        if let Scenario::Calculator { math, .. } = scenario {
            let shown = format!("{}", math.expected());
            page = page.respond(&math.query_text(), ResultsPage::calculator(&shown));
        }
    }
    page
}

#[tokio::test]
async fn test_default_suite_passes_on_cooperative_page() {
    let config = ProbeConfig::builder().seed(2024).build().unwrap();
    let mut operands = OperandSource::new(config.seed(), config.math_operand_bound());
    let scenarios = Scenario::default_suite(&config, &mut operands);
    let page = cooperative_page(&scenarios);

    let report = run_suite(&page, config.selectors(), &scenarios).await;

    let failures: Vec<_> = report.scenarios.iter().filter(|r| !r.passed()).collect();
    assert!(failures.is_empty(), "unexpected failures: {failures:?}");
    assert_eq!(report.passed_count(), scenarios.len());
    assert!(report.all_passed());
}

#[tokio::test]
async fn test_failing_scenario_does_not_stop_the_suite() {
    let selectors = Selectors::google();
    let page = ScriptedPage::new()
        .respond(
            "site:medium.com jest",
            ResultsPage::with_links(&["https://medium.com/a", "https://jestjs.io/docs"]),
        )
        .respond("37 + 482", ResultsPage::calculator("519"));

    let scenarios = vec![
        Scenario::for_operator("site", SearchQuery::parse("site:medium.com jest")).unwrap(),
        Scenario::Calculator {
            name: "fixed addition".to_string(),
            math: MathQuery::new(37, Operator::Add, 482),
            digits: 8,
        },
    ];

    let report = run_suite(&page, &selectors, &scenarios).await;

    assert_eq!(report.failed_count(), 1);
    match &report.scenarios[0].outcome {
        Outcome::Failed { error } => assert!(error.contains("https://jestjs.io/docs")),
        Outcome::Passed => panic!("site scenario should fail"),
    }
    assert!(report.scenarios[1].passed());
    assert_eq!(report.scenarios[1].query, "37 + 482");
}

#[tokio::test]
async fn test_result_count_mismatch_reported() {
    let selectors = Selectors::google();
    let page = ScriptedPage::new().respond(
        "jest puppeteer",
        ResultsPage::with_links(&["https://a.example/", "https://b.example/"]),
    );
    let scenario = Scenario::ResultCount {
        name: "ten results".to_string(),
        query: SearchQuery::plain("jest puppeteer"),
        expected: 10,
    };

    let report = run_scenario(&page, &selectors, &scenario).await;

    assert_eq!(
        report.outcome,
        Outcome::Failed {
            error: "Assertion failed: result count: expected 10, got 2".to_string()
        }
    );
}

#[tokio::test]
async fn test_empty_result_set_passes_predicate_vacuously() {
    let selectors = Selectors::google();
    let page = ScriptedPage::new();
    let scenario = Scenario::AllResults {
        name: "pdf only".to_string(),
        query: SearchQuery::file_type("pdf", "javascript"),
        predicate: ResultPredicate::Extension("pdf".to_string()),
    };

    let report = run_scenario(&page, &selectors, &scenario).await;

    assert!(report.passed());
}

#[tokio::test]
async fn test_math_check_returns_shown_value() {
    let selectors = Selectors::google();
    let page = ScriptedPage::new().respond("1 / 3", ResultsPage::calculator("0.333333333333"));

    let shown = run_math_check(&page, &selectors, &MathQuery::new(1, Operator::Divide, 3), 8)
        .await
        .unwrap();

    assert!((shown - 1.0 / 3.0).abs() < 1e-8);
}

#[tokio::test]
async fn test_math_check_rejects_wrong_answer() {
    let selectors = Selectors::google();
    let page = ScriptedPage::new().respond("2 - 5", ResultsPage::calculator("3"));

    let err = run_math_check(&page, &selectors, &MathQuery::new(2, Operator::Subtract, 5), 8)
        .await
        .unwrap_err();

    assert!(matches!(err, ProbeError::Assertion(_)));
}
