//! Environment overlay for `ProbeConfig`
//!
//! Reads `SEARCH_PROBE_*` variables on top of the builder defaults. Browser
//! discovery reads `CHROMIUM_PATH` separately in `browser_setup`.

use anyhow::{Context, Result};
use tracing::debug;

use super::builder::ProbeConfigBuilder;
use super::types::ProbeConfig;

pub const ENV_HOME_URL: &str = "SEARCH_PROBE_HOME_URL";
pub const ENV_HEADLESS: &str = "SEARCH_PROBE_HEADLESS";
pub const ENV_SEED: &str = "SEARCH_PROBE_SEED";
pub const ENV_NAV_TIMEOUT_SECS: &str = "SEARCH_PROBE_NAV_TIMEOUT_SECS";

/// Parse a boolean flag the way shells usually spell them
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl ProbeConfigBuilder {
    /// Apply overrides from a variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_HOME_URL) {
            debug!("{ENV_HOME_URL}={url}");
            self = self.home_url(url);
        }

        if let Some(raw) = lookup(ENV_HEADLESS) {
            let headless = parse_flag(&raw)
                .with_context(|| format!("{ENV_HEADLESS} must be a boolean flag, got '{raw}'"))?;
            self = self.headless(headless);
        }

        if let Some(raw) = lookup(ENV_SEED) {
            let seed = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{ENV_SEED} must be an unsigned integer, got '{raw}'"))?;
            self = self.seed(seed);
        }

        if let Some(raw) = lookup(ENV_NAV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().with_context(|| {
                format!("{ENV_NAV_TIMEOUT_SECS} must be a number of seconds, got '{raw}'")
            })?;
            self = self.navigation_timeout_secs(secs);
        }

        Ok(self)
    }
}

impl ProbeConfig {
    /// Build a configuration from defaults plus process environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if an override is malformed or the result fails
    /// validation.
    pub fn from_env() -> Result<Self> {
        Self::builder()
            .with_overrides(|key| std::env::var(key).ok())?
            .build()
    }
}
