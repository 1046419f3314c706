//! Fluent builder for `ProbeConfig`
//!
//! Every field has a default, so `ProbeConfig::builder().build()` is a valid
//! configuration targeting Google.

use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

use super::types::ProbeConfig;
use crate::selectors::Selectors;
use crate::utils::{
    DEFAULT_CLOSENESS_DIGITS, DEFAULT_EXPECTED_RESULT_COUNT, DEFAULT_HOME_URL,
    DEFAULT_MATH_OPERAND_BOUND, DEFAULT_NAVIGATION_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_WINDOW_SIZE, MAX_CLOSENESS_DIGITS,
};

/// Normalize a home URL: add https:// if no scheme is present
fn normalize_home_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&candidate).map_err(|e| anyhow!("Invalid home URL '{raw}': {e}"))?;
    if parsed.host_str().is_none() {
        return Err(anyhow!("Home URL '{raw}' has no host"));
    }
    Ok(candidate)
}

/// Unvalidated configuration; missing fields take their defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfigBuilder {
    pub(crate) home_url: String,
    pub(crate) headless: bool,
    pub(crate) chrome_data_dir: Option<PathBuf>,
    pub(crate) navigation_timeout_secs: u64,
    pub(crate) request_timeout_secs: u64,
    pub(crate) window_size: (u32, u32),
    pub(crate) selectors: Selectors,
    pub(crate) math_operand_bound: u32,
    pub(crate) closeness_digits: i32,
    pub(crate) expected_result_count: usize,
    pub(crate) seed: Option<u64>,
}

impl Default for ProbeConfigBuilder {
    fn default() -> Self {
        Self {
            home_url: DEFAULT_HOME_URL.to_string(),
            headless: true,
            chrome_data_dir: None,
            navigation_timeout_secs: DEFAULT_NAVIGATION_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            window_size: DEFAULT_WINDOW_SIZE,
            selectors: Selectors::google(),
            math_operand_bound: DEFAULT_MATH_OPERAND_BOUND,
            closeness_digits: DEFAULT_CLOSENESS_DIGITS,
            expected_result_count: DEFAULT_EXPECTED_RESULT_COUNT,
            seed: None,
        }
    }
}

impl ProbeConfig {
    /// Create a builder for configuring a `ProbeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ProbeConfigBuilder {
        ProbeConfigBuilder::default()
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        let b = ProbeConfigBuilder::default();
        Self {
            home_url: b.home_url,
            headless: b.headless,
            chrome_data_dir: b.chrome_data_dir,
            navigation_timeout_secs: b.navigation_timeout_secs,
            request_timeout_secs: b.request_timeout_secs,
            window_size: b.window_size,
            selectors: b.selectors,
            math_operand_bound: b.math_operand_bound,
            closeness_digits: b.closeness_digits,
            expected_result_count: b.expected_result_count,
            seed: b.seed,
        }
    }
}

impl ProbeConfigBuilder {
    #[must_use]
    pub fn home_url(mut self, url: impl Into<String>) -> Self {
        self.home_url = url.into();
        self
    }

    /// Set browser headless mode
    ///
    /// Headed mode needs a display server; keep the default in CI.
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn chrome_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.chrome_data_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn navigation_timeout_secs(mut self, secs: u64) -> Self {
        self.navigation_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    #[must_use]
    pub fn selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    #[must_use]
    pub fn math_operand_bound(mut self, bound: u32) -> Self {
        self.math_operand_bound = bound;
        self
    }

    #[must_use]
    pub fn closeness_digits(mut self, digits: i32) -> Self {
        self.closeness_digits = digits;
        self
    }

    #[must_use]
    pub fn expected_result_count(mut self, count: usize) -> Self {
        self.expected_result_count = count;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate and build the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the home URL does not parse, a timeout is zero, the
    /// operand bound is zero, or `closeness_digits` is outside `0..=15`.
    pub fn build(self) -> Result<ProbeConfig> {
        let home_url = normalize_home_url(&self.home_url)?;

        if self.navigation_timeout_secs == 0 {
            return Err(anyhow!("navigation_timeout_secs must be greater than zero"));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("request_timeout_secs must be greater than zero"));
        }
        if self.math_operand_bound == 0 {
            return Err(anyhow!("math_operand_bound must be greater than zero"));
        }
        if !(0..=MAX_CLOSENESS_DIGITS).contains(&self.closeness_digits) {
            return Err(anyhow!(
                "closeness_digits must be within 0..={MAX_CLOSENESS_DIGITS}, got {}",
                self.closeness_digits
            ));
        }

        Ok(ProbeConfig {
            home_url,
            headless: self.headless,
            chrome_data_dir: self.chrome_data_dir,
            navigation_timeout_secs: self.navigation_timeout_secs,
            request_timeout_secs: self.request_timeout_secs,
            window_size: self.window_size,
            selectors: self.selectors,
            math_operand_bound: self.math_operand_bound,
            closeness_digits: self.closeness_digits,
            expected_result_count: self.expected_result_count,
            seed: self.seed,
        })
    }
}

impl TryFrom<ProbeConfigBuilder> for ProbeConfig {
    type Error = anyhow::Error;

    fn try_from(builder: ProbeConfigBuilder) -> Result<Self> {
        builder.build()
    }
}
