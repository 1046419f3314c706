//! CSS selectors for the target results page
//!
//! Every selector the probes rely on lives in one table so markup drift on the
//! search engine side is a one-place edit.

use serde::{Deserialize, Serialize};

/// Selector table for the search page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selectors {
    /// Query text input
    pub query_input: String,

    /// Form enclosing the query input
    pub query_form: String,

    /// One organic result block
    pub result: String,

    /// Title link of each result block
    ///
    /// Google has shipped both `h3 > a` and `a > h3` nestings, so the default
    /// matches either and `extract::result_links` resolves the anchor.
    pub result_link: String,

    /// Output node of the built-in calculator
    pub calculator: String,
}

impl Selectors {
    pub const QUERY_INPUT: &'static str = r#"input[name="q"]"#;
    pub const QUERY_FORM: &'static str = r#"form[name="f"]"#;
    pub const RESULT: &'static str = ".g";
    pub const RESULT_LINK: &'static str = ".g h3 a, .g a:has(> h3)";
    pub const CALCULATOR: &'static str = "#cwos";

    /// Selectors for Google's results page
    #[must_use]
    pub fn google() -> Self {
        Self {
            query_input: Self::QUERY_INPUT.to_string(),
            query_form: Self::QUERY_FORM.to_string(),
            result: Self::RESULT.to_string(),
            result_link: Self::RESULT_LINK.to_string(),
            calculator: Self::CALCULATOR.to_string(),
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self::google()
    }
}
