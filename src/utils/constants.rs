//! Shared configuration constants for search probes
//!
//! Default values used by `ProbeConfig` and the scenario suite, kept in one
//! place to avoid magic numbers.

/// Search engine home page the session opens before the first query
pub const DEFAULT_HOME_URL: &str = "https://google.com";

/// Default navigation wait: 30 seconds
///
/// Matches the driver's own request timeout so a stuck submit fails with a
/// navigation timeout rather than a protocol error.
pub const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 30;

/// Timeout for individual CDP requests
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Browser window size used for every session
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (1920, 1080);

/// Exclusive upper bound for random arithmetic operands
pub const DEFAULT_MATH_OPERAND_BOUND: u32 = 1000;

/// Decimal digits of precision for calculator closeness checks
///
/// 8 digits means the calculator value must lie within `10^-8 / 2` of the
/// locally computed value.
pub const DEFAULT_CLOSENESS_DIGITS: i32 = 8;

/// Largest closeness precision an `f64` can meaningfully resolve
pub const MAX_CLOSENESS_DIGITS: i32 = 15;

/// Organic results expected on the first results screen
pub const DEFAULT_EXPECTED_RESULT_COUNT: usize = 10;

/// Chrome user agent string for stealth mode
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
///
/// Chrome releases new stable versions ~every 4 weeks.
/// Update quarterly to stay within reasonable version window.
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
