//! Probe scenarios and the suite runner
//!
//! A scenario is one query plus the check applied to the page it produces.
//! A failing scenario is recorded and the runner moves on to the next one.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::arithmetic::{MathQuery, OperandSource, Operator};
use crate::assertion;
use crate::config::ProbeConfig;
use crate::driver::PageDriver;
use crate::error::ProbeResult;
use crate::extract;
use crate::predicate::ResultPredicate;
use crate::query::{SearchQuery, execute_query};
use crate::selectors::Selectors;

/// One query and the check applied to its results page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scenario {
    /// The results page shows exactly `expected` result blocks
    ResultCount {
        name: String,
        query: SearchQuery,
        expected: usize,
    },
    /// Every result link satisfies `predicate`
    AllResults {
        name: String,
        query: SearchQuery,
        predicate: ResultPredicate,
    },
    /// The calculator shows the locally computed answer
    Calculator {
        name: String,
        math: MathQuery,
        digits: i32,
    },
}

impl Scenario {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Scenario::ResultCount { name, .. }
            | Scenario::AllResults { name, .. }
            | Scenario::Calculator { name, .. } => name,
        }
    }

    /// Text typed into the search input
    #[must_use]
    pub fn query_text(&self) -> String {
        match self {
            Scenario::ResultCount { query, .. } | Scenario::AllResults { query, .. } => {
                query.text()
            }
            Scenario::Calculator { math, .. } => math.query_text(),
        }
    }

    /// Result-set scenario whose predicate follows from the query's operator
    ///
    /// Returns `None` for a query without an operator.
    #[must_use]
    pub fn for_operator(name: impl Into<String>, query: SearchQuery) -> Option<Self> {
        let predicate = query.expected_predicate()?;
        Some(Scenario::AllResults {
            name: name.into(),
            query,
            predicate,
        })
    }

    /// The built-in suite
    ///
    /// Fixed queries for result count, `site:`, `filetype:`, `inurl:` and
    /// `37 + 482`, followed by random addition, subtraction and division.
    #[must_use]
    pub fn default_suite(config: &ProbeConfig, operands: &mut OperandSource) -> Vec<Scenario> {
        let digits = config.closeness_digits();
        let mut suite = vec![Scenario::ResultCount {
            name: "results page lists the expected number of results".to_string(),
            query: SearchQuery::plain("jest puppeteer"),
            expected: config.expected_result_count(),
        }];

        let operator_queries = [
            ("site: restricts results to one host", SearchQuery::site("medium.com", "jest")),
            (
                "filetype: restricts results to one extension",
                SearchQuery::file_type("pdf", "javascript"),
            ),
            (
                "inurl: restricts results to urls containing the token",
                SearchQuery::in_url("article", "javascript"),
            ),
        ];
        suite.extend(
            operator_queries
                .into_iter()
                .filter_map(|(name, query)| Scenario::for_operator(name, query)),
        );

        suite.push(Scenario::Calculator {
            name: "calculator adds fixed operands".to_string(),
            math: MathQuery::new(37, Operator::Add, 482),
            digits,
        });

        for (label, op) in [
            ("adds", Operator::Add),
            ("subtracts", Operator::Subtract),
            ("divides", Operator::Divide),
        ] {
            suite.push(Scenario::Calculator {
                name: format!("calculator {label} random operands"),
                math: operands.next_query(op),
                digits,
            });
        }

        suite
    }
}

/// Outcome of one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed { error: String },
}

/// Report line for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub name: String,
    pub query: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ScenarioReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }
}

/// Reports for a whole suite run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Seed used for random arithmetic operands
    pub seed: Option<u64>,
    pub scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.scenarios.iter().filter(|r| r.passed()).count()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.scenarios.len() - self.passed_count()
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }
}

/// Submit `math` as a query and check the calculator's answer
///
/// Returns the value the page displayed.
pub async fn run_math_check<D: PageDriver>(
    driver: &D,
    selectors: &Selectors,
    math: &MathQuery,
    digits: i32,
) -> ProbeResult<f64> {
    execute_query(driver, selectors, &math.query_text()).await?;
    let shown = extract::calculator_value(driver, selectors).await?;
    assertion::assert_close_to(shown, math.expected(), digits)?;
    Ok(shown)
}

async fn check_scenario<D: PageDriver>(
    driver: &D,
    selectors: &Selectors,
    scenario: &Scenario,
) -> ProbeResult<()> {
    match scenario {
        Scenario::ResultCount {
            query, expected, ..
        } => {
            execute_query(driver, selectors, &query.text()).await?;
            let count = extract::result_count(driver, selectors).await?;
            assertion::assert_equal("result count", &count, expected)
        }
        Scenario::AllResults {
            query, predicate, ..
        } => {
            execute_query(driver, selectors, &query.text()).await?;
            let links = extract::result_links(driver, selectors).await?;
            predicate.check_all(&links)
        }
        Scenario::Calculator { math, digits, .. } => {
            run_math_check(driver, selectors, math, *digits).await.map(|_| ())
        }
    }
}

/// Run one scenario, converting any failure into a report line
pub async fn run_scenario<D: PageDriver>(
    driver: &D,
    selectors: &Selectors,
    scenario: &Scenario,
) -> ScenarioReport {
    let outcome = match check_scenario(driver, selectors, scenario).await {
        Ok(()) => {
            info!("PASS {}", scenario.name());
            Outcome::Passed
        }
        Err(e) => {
            warn!("FAIL {}: {}", scenario.name(), e);
            Outcome::Failed {
                error: e.to_string(),
            }
        }
    };

    ScenarioReport {
        name: scenario.name().to_string(),
        query: scenario.query_text(),
        outcome,
    }
}

/// Run scenarios one after another on the same page
pub async fn run_suite<D: PageDriver>(
    driver: &D,
    selectors: &Selectors,
    scenarios: &[Scenario],
) -> SuiteReport {
    let mut report = SuiteReport::default();
    for scenario in scenarios {
        report
            .scenarios
            .push(run_scenario(driver, selectors, scenario).await);
    }
    info!(
        "Suite finished: {} passed, {} failed",
        report.passed_count(),
        report.failed_count()
    );
    report
}
