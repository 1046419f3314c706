//! Core configuration type for search probes

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::builder::ProbeConfigBuilder;
use crate::selectors::Selectors;

/// Configuration for a probe session and its scenario suite
///
/// Deserialization goes through `ProbeConfigBuilder::build`, so a config read
/// from JSON is validated the same way as one built in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ProbeConfigBuilder")]
pub struct ProbeConfig {
    /// Search engine home page.
    ///
    /// **INVARIANT:** Always an absolute http(s) URL (normalized in builder).
    pub(crate) home_url: String,
    pub(crate) headless: bool,

    /// Chrome profile directory. `None` uses a per-process temp directory.
    pub(crate) chrome_data_dir: Option<PathBuf>,

    /// Timeout in seconds for the navigation that follows a query submit
    ///
    /// Default: 30 seconds
    pub(crate) navigation_timeout_secs: u64,

    /// Timeout in seconds for each CDP request
    ///
    /// Default: 30 seconds
    pub(crate) request_timeout_secs: u64,

    pub(crate) window_size: (u32, u32),
    pub(crate) selectors: Selectors,

    /// Exclusive upper bound for random arithmetic operands
    pub(crate) math_operand_bound: u32,

    /// Decimal digits used by the calculator closeness assertion
    pub(crate) closeness_digits: i32,

    pub(crate) expected_result_count: usize,

    /// Seed for arithmetic operands. `None` draws a fresh seed per run.
    pub(crate) seed: Option<u64>,
}
