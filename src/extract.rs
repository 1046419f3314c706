//! Result extraction from the current results page
//!
//! Only the first results screen is read; there is no pagination.

use serde_json::Value;
use tracing::{debug, warn};

use crate::driver::{PageDriver, scripts};
use crate::error::{ProbeError, ProbeResult};
use crate::selectors::Selectors;

/// Number of organic result blocks on the page
///
/// A selector that matches nothing yields 0, not an error.
pub async fn result_count<D: PageDriver>(driver: &D, selectors: &Selectors) -> ProbeResult<usize> {
    let value = driver
        .eval_on_selector_all(&selectors.result, scripts::COUNT_NODES)
        .await?;
    let count = value
        .as_u64()
        .ok_or_else(|| ProbeError::Script(format!("expected a node count, got {value}")))?;
    let count = usize::try_from(count)
        .map_err(|_| ProbeError::Script(format!("node count {count} out of range")))?;

    if count == 0 {
        warn!(
            "Result selector '{}' matched no nodes; markup may have changed",
            selectors.result
        );
    }
    debug!("Found {} result nodes", count);
    Ok(count)
}

/// Absolute URLs of the result title links, in page order
///
/// A selector that matches nothing yields an empty list, not an error.
pub async fn result_links<D: PageDriver>(
    driver: &D,
    selectors: &Selectors,
) -> ProbeResult<Vec<String>> {
    let value = driver
        .eval_on_selector_all(&selectors.result_link, scripts::ANCHOR_HREFS)
        .await?;
    let links = hrefs_from_value(value)?;

    if links.is_empty() {
        warn!(
            "Result link selector '{}' matched no nodes; markup may have changed",
            selectors.result_link
        );
    }
    debug!("Extracted {} result links", links.len());
    Ok(links)
}

fn hrefs_from_value(value: Value) -> ProbeResult<Vec<String>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(href) => Ok(href),
                other => Err(ProbeError::Script(format!("expected an href string, got {other}"))),
            })
            .collect(),
        other => Err(ProbeError::Script(format!("expected an array of hrefs, got {other}"))),
    }
}

/// Raw text of the calculator output node
///
/// # Errors
///
/// `ElementNotFound` if the page shows no calculator.
pub async fn calculator_text<D: PageDriver>(
    driver: &D,
    selectors: &Selectors,
) -> ProbeResult<String> {
    let value = driver
        .eval_on_selector(&selectors.calculator, scripts::TEXT_CONTENT)
        .await?;
    match value {
        Value::String(text) => Ok(text),
        Value::Null => Ok(String::new()),
        other => Err(ProbeError::Script(format!("expected calculator text, got {other}"))),
    }
}

/// Calculator output parsed as a number
pub async fn calculator_value<D: PageDriver>(
    driver: &D,
    selectors: &Selectors,
) -> ProbeResult<f64> {
    let text = calculator_text(driver, selectors).await?;
    parse_calculator_text(&text)
}

fn is_group_separator(c: char) -> bool {
    matches!(c, ',' | ' ' | '\u{2009}' | '\u{202f}' | '\u{a0}')
}

/// A separator counts only between a digit and a group of exactly three
/// digits, as in `1,234` or `1 234 567`.
fn separates_digit_groups(chars: &[char], at: usize) -> bool {
    let before = at.checked_sub(1).and_then(|i| chars.get(i));
    let group = chars.get(at + 1..at + 4);
    let after_group = chars.get(at + 4);
    before.is_some_and(char::is_ascii_digit)
        && group.is_some_and(|g| g.iter().all(char::is_ascii_digit))
        && !after_group.is_some_and(char::is_ascii_digit)
}

/// Parse calculator display text into a number
///
/// Tolerates surrounding whitespace, digit-group separators (`,`, thin and
/// regular spaces) between thousands groups, and the Unicode minus sign.
///
/// # Errors
///
/// `ProbeError::Parse` if the text is not a number, including separators
/// that do not sit between digit groups (`"1 2"`).
pub fn parse_calculator_text(text: &str) -> ProbeResult<f64> {
    let chars: Vec<char> = text.trim().chars().collect();
    let normalized: String = chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| !(is_group_separator(c) && separates_digit_groups(&chars, i)))
        .map(|(_, &c)| if c == '\u{2212}' { '-' } else { c })
        .collect();

    normalized.parse::<f64>().map_err(|_| ProbeError::Parse {
        text: text.to_string(),
        expected: "a number",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_grouped_numbers() {
        assert_eq!(parse_calculator_text("519").unwrap(), 519.0);
        assert_eq!(parse_calculator_text("  519 \n").unwrap(), 519.0);
        assert_eq!(parse_calculator_text("1,234,567").unwrap(), 1_234_567.0);
        assert_eq!(parse_calculator_text("1\u{2009}234").unwrap(), 1234.0);
        assert_eq!(parse_calculator_text("\u{2212}472").unwrap(), -472.0);
        assert_eq!(parse_calculator_text("0.333333333333").unwrap(), 0.333_333_333_333);
        assert_eq!(parse_calculator_text("1.5e-7").unwrap(), 1.5e-7);
    }

    #[test]
    fn test_parse_rejects_stray_separators() {
        assert!(parse_calculator_text("1 2").is_err());
        assert!(parse_calculator_text("12,34").is_err());
        assert!(parse_calculator_text("1,2345").is_err());
        assert!(parse_calculator_text("1 234 5").is_err());
        assert_eq!(parse_calculator_text("1 234 567.25").unwrap(), 1_234_567.25);
        assert_eq!(parse_calculator_text("\u{2212}1\u{a0}000").unwrap(), -1000.0);
    }

    #[test]
    fn test_parse_infinity() {
        assert!(parse_calculator_text("Infinity").unwrap().is_infinite());
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        assert!(matches!(
            parse_calculator_text(""),
            Err(ProbeError::Parse { .. })
        ));
        assert!(parse_calculator_text("Error").is_err());
    }

    #[test]
    fn test_hrefs_shape_checked() {
        let links = hrefs_from_value(serde_json::json!(["https://a.com/", "https://b.com/x"])).unwrap();
        assert_eq!(links, vec!["https://a.com/", "https://b.com/x"]);
        assert!(hrefs_from_value(serde_json::json!([1])).is_err());
        assert!(hrefs_from_value(serde_json::json!({"href": "x"})).is_err());
    }
}
