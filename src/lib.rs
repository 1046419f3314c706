pub mod arithmetic;
pub mod assertion;
pub mod browser;
pub mod browser_setup;
pub mod config;
pub mod driver;
pub mod error;
pub mod extract;
pub mod logging;
pub mod predicate;
pub mod query;
pub mod scenario;
pub mod selectors;
pub mod session;
pub mod utils;

pub use arithmetic::{MathQuery, OperandSource, Operator};
pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use config::ProbeConfig;
pub use driver::{ChromiumPage, NavigationWait, PageDriver};
pub use error::{ProbeError, ProbeResult};
pub use predicate::ResultPredicate;
pub use query::{QueryOperator, SearchQuery, execute_query};
pub use scenario::{
    Outcome, Scenario, ScenarioReport, SuiteReport, run_math_check, run_scenario, run_suite,
};
pub use selectors::Selectors;
pub use session::SearchSession;
