//! Per-URL predicates applied to an extracted result set
//!
//! Each predicate is checked for every URL; the set passes only if all of
//! them hold. An empty set passes vacuously.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::assertion;
use crate::error::ProbeResult;

/// Host of `url` with its port, if it parses and has a host
///
/// Same shape as a browser's `URL.host`: a non-default port is kept as
/// `host:port`, the scheme's default port is dropped.
#[must_use]
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Text after the last `.` of the whole URL string
#[must_use]
pub fn extension_of(url: &str) -> Option<&str> {
    url.rsplit_once('.').map(|(_, ext)| ext)
}

/// Case-insensitive containment of `token` anywhere in `url`
///
/// Deliberately not restricted to the path: a token in the host or query
/// string also matches.
#[must_use]
pub fn contains_ignore_case(url: &str, token: &str) -> bool {
    url.to_lowercase().contains(&token.to_lowercase())
}

/// Property every result URL must satisfy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultPredicate {
    /// Host (with any non-default port) equals the given host exactly
    Domain(String),
    /// Text after the last `.` equals the given extension (case-sensitive)
    Extension(String),
    /// URL contains the given token, ignoring case
    UrlContains(String),
}

impl ResultPredicate {
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        match self {
            ResultPredicate::Domain(expected) => host_of(url).is_some_and(|host| host == *expected),
            ResultPredicate::Extension(expected) => extension_of(url) == Some(expected.as_str()),
            ResultPredicate::UrlContains(token) => contains_ignore_case(url, token),
        }
    }

    /// Assert the predicate holds for every URL in `urls`
    ///
    /// # Errors
    ///
    /// `ProbeError::Assertion` naming the first URL that fails.
    pub fn check_all(&self, urls: &[String]) -> ProbeResult<()> {
        assertion::assert_all(urls, &self.to_string(), |url| self.matches(url))
    }
}

impl fmt::Display for ResultPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultPredicate::Domain(host) => write!(f, "host == {host}"),
            ResultPredicate::Extension(ext) => write!(f, "extension == {ext}"),
            ResultPredicate::UrlContains(token) => write!(f, "url contains '{token}' (any case)"),
        }
    }
}
