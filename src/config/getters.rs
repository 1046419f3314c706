//! Getter methods for `ProbeConfig`

use std::path::PathBuf;
use std::time::Duration;

use super::types::ProbeConfig;
use crate::selectors::Selectors;

impl ProbeConfig {
    #[must_use]
    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&PathBuf> {
        self.chrome_data_dir.as_ref()
    }

    #[must_use]
    pub fn navigation_timeout_secs(&self) -> u64 {
        self.navigation_timeout_secs
    }

    /// Navigation wait as a `Duration`
    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    #[must_use]
    pub fn selectors(&self) -> &Selectors {
        &self.selectors
    }

    #[must_use]
    pub fn math_operand_bound(&self) -> u32 {
        self.math_operand_bound
    }

    #[must_use]
    pub fn closeness_digits(&self) -> i32 {
        self.closeness_digits
    }

    #[must_use]
    pub fn expected_result_count(&self) -> usize {
        self.expected_result_count
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
