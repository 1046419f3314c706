//! Query model and the query execution protocol
//!
//! A query is typed into the search input and the form is submitted with a
//! navigation watcher already registered, so the results page can never load
//! unobserved.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{debug, info};

use crate::driver::{PageDriver, scripts};
use crate::error::ProbeResult;
use crate::predicate::ResultPredicate;
use crate::selectors::Selectors;

/// Search operator narrowing the result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryOperator {
    /// `site:<host>`
    Site(String),
    /// `filetype:<ext>`
    FileType(String),
    /// `inurl:<token>`
    InUrl(String),
}

impl QueryOperator {
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            QueryOperator::Site(_) => "site:",
            QueryOperator::FileType(_) => "filetype:",
            QueryOperator::InUrl(_) => "inurl:",
        }
    }

    #[must_use]
    pub fn argument(&self) -> &str {
        match self {
            QueryOperator::Site(v) | QueryOperator::FileType(v) | QueryOperator::InUrl(v) => v,
        }
    }

    /// The property every result URL should satisfy under this operator
    #[must_use]
    pub fn predicate(&self) -> ResultPredicate {
        match self {
            QueryOperator::Site(host) => ResultPredicate::Domain(host.clone()),
            QueryOperator::FileType(ext) => ResultPredicate::Extension(ext.clone()),
            QueryOperator::InUrl(token) => ResultPredicate::UrlContains(token.clone()),
        }
    }

    fn parse(token: &str) -> Option<Self> {
        let (prefix, argument) = token.split_once(':')?;
        if argument.is_empty() {
            return None;
        }
        let argument = argument.to_string();
        match prefix {
            "site" => Some(QueryOperator::Site(argument)),
            "filetype" => Some(QueryOperator::FileType(argument)),
            "inurl" => Some(QueryOperator::InUrl(argument)),
            _ => None,
        }
    }
}

/// Free-text query with an optional leading operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    operator: Option<QueryOperator>,
    terms: String,
}

impl SearchQuery {
    #[must_use]
    pub fn plain(terms: impl Into<String>) -> Self {
        Self {
            operator: None,
            terms: terms.into(),
        }
    }

    #[must_use]
    pub fn site(host: impl Into<String>, terms: impl Into<String>) -> Self {
        Self {
            operator: Some(QueryOperator::Site(host.into())),
            terms: terms.into(),
        }
    }

    #[must_use]
    pub fn file_type(extension: impl Into<String>, terms: impl Into<String>) -> Self {
        Self {
            operator: Some(QueryOperator::FileType(extension.into())),
            terms: terms.into(),
        }
    }

    #[must_use]
    pub fn in_url(token: impl Into<String>, terms: impl Into<String>) -> Self {
        Self {
            operator: Some(QueryOperator::InUrl(token.into())),
            terms: terms.into(),
        }
    }

    /// Parse query text, recognizing an operator in the first token
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let (first, rest) = match text.split_once(char::is_whitespace) {
            Some((first, rest)) => (first, rest.trim_start()),
            None => (text, ""),
        };
        match QueryOperator::parse(first) {
            Some(operator) => Self {
                operator: Some(operator),
                terms: rest.to_string(),
            },
            None => Self::plain(text),
        }
    }

    #[must_use]
    pub fn operator(&self) -> Option<&QueryOperator> {
        self.operator.as_ref()
    }

    #[must_use]
    pub fn terms(&self) -> &str {
        &self.terms
    }

    /// Text typed into the search input
    #[must_use]
    pub fn text(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn expected_predicate(&self) -> Option<ResultPredicate> {
        self.operator.as_ref().map(QueryOperator::predicate)
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operator {
            Some(op) if self.terms.is_empty() => write!(f, "{}{}", op.prefix(), op.argument()),
            Some(op) => write!(f, "{}{} {}", op.prefix(), op.argument(), self.terms),
            None => f.write_str(&self.terms),
        }
    }
}

/// Run one query through the page's search form
///
/// Clears the input, types `query`, then submits the form and waits for the
/// resulting navigation. The watcher is registered before the submit is
/// issued and both are awaited together. A single attempt: no retries.
///
/// # Errors
///
/// `ElementNotFound` if the input or form is missing, `NavigationTimeout` if
/// no page load follows the submit.
pub async fn execute_query<D: PageDriver>(
    driver: &D,
    selectors: &Selectors,
    query: &str,
) -> ProbeResult<()> {
    info!("Executing search query: '{}'", query);

    driver
        .set_property(&selectors.query_input, "value", Value::String(String::new()))
        .await?;
    driver.type_into(&selectors.query_input, query).await?;

    let navigation = driver.wait_for_navigation().await?;
    let submit = async {
        driver
            .eval_on_selector(&selectors.query_form, scripts::SUBMIT_FORM)
            .await
            .map(|_| ())
    };
    futures::future::try_join(navigation, submit).await?;

    debug!("Results page loaded for '{}'", query);
    Ok(())
}
