//! Assertions over extracted page data
//!
//! Failures are returned as `ProbeError::Assertion` so a runner can report
//! them next to page errors instead of panicking.

use std::fmt::Debug;

use crate::error::{ProbeError, ProbeResult};
use crate::utils::MAX_CLOSENESS_DIGITS;

/// Assert `actual == expected`
///
/// # Errors
///
/// `ProbeError::Assertion` describing both values.
pub fn assert_equal<T: PartialEq + Debug>(label: &str, actual: &T, expected: &T) -> ProbeResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(ProbeError::Assertion(format!(
            "{label}: expected {expected:?}, got {actual:?}"
        )))
    }
}

/// Whether `actual` is within `10^-digits / 2` of `expected`
///
/// `digits` is clamped to `0..=MAX_CLOSENESS_DIGITS`, so the tolerance never
/// exceeds `0.5`. Equal infinities are close; NaN is never close to anything.
#[must_use]
pub fn is_close_to(actual: f64, expected: f64, digits: i32) -> bool {
    if actual.is_infinite() || expected.is_infinite() {
        return actual == expected;
    }
    let digits = digits.clamp(0, MAX_CLOSENESS_DIGITS);
    let tolerance = 10f64.powi(-digits) / 2.0;
    (expected - actual).abs() < tolerance
}

/// Assert `actual` is close to `expected` at `digits` decimal digits
///
/// # Errors
///
/// `ProbeError::Assertion` with both values and the difference.
pub fn assert_close_to(actual: f64, expected: f64, digits: i32) -> ProbeResult<()> {
    if is_close_to(actual, expected, digits) {
        Ok(())
    } else {
        Err(ProbeError::Assertion(format!(
            "expected {actual} to be close to {expected} ({digits} digits), difference {}",
            (expected - actual).abs()
        )))
    }
}

/// Assert `predicate` holds for every item
///
/// # Errors
///
/// `ProbeError::Assertion` naming the first failing item and its index.
pub fn assert_all<T, F>(items: &[T], description: &str, predicate: F) -> ProbeResult<()>
where
    T: Debug,
    F: Fn(&T) -> bool,
{
    match items.iter().position(|item| !predicate(item)) {
        None => Ok(()),
        Some(index) => Err(ProbeError::Assertion(format!(
            "expected every item to satisfy `{description}`, but item at index {index} ({:?}) did not ({} of {} checked)",
            items[index],
            index + 1,
            items.len()
        ))),
    }
}
