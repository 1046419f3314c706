//! Error types for probe operations
//!
//! Element lookups, navigation waits and assertions are the only failures a
//! scenario can surface. None of them are retried.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Error types for probe operations
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A selector addressed to a single element matched nothing
    #[error("Element not found for selector '{selector}'")]
    ElementNotFound { selector: String },

    /// No navigation completed within the configured window
    #[error("Navigation did not complete within {timeout:?}")]
    NavigationTimeout { timeout: Duration },

    /// An assertion over extracted page data did not hold
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// Page text could not be parsed into the expected value
    #[error("Failed to parse '{text}' as {expected}")]
    Parse { text: String, expected: &'static str },

    /// An evaluated script returned a payload of an unexpected shape
    #[error("Unexpected script result: {0}")]
    Script(String),

    /// Chrome DevTools protocol failure
    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    /// The browser connection went away mid-operation
    #[error("Browser connection closed: {0}")]
    Closed(String),

    /// Browser discovery, download or launch failed
    #[error("Browser launch failed: {0}")]
    Launch(String),
}

impl From<anyhow::Error> for ProbeError {
    fn from(error: anyhow::Error) -> Self {
        ProbeError::Launch(format!("{error:#}"))
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(error: serde_json::Error) -> Self {
        ProbeError::Script(error.to_string())
    }
}

impl ProbeError {
    /// Build an element-not-found error for `selector`
    #[must_use]
    pub fn not_found(selector: impl Into<String>) -> Self {
        ProbeError::ElementNotFound {
            selector: selector.into(),
        }
    }

    /// True for failures raised by the assertion layer rather than the page
    #[must_use]
    pub fn is_assertion(&self) -> bool {
        matches!(self, ProbeError::Assertion(_))
    }
}
