//! JavaScript evaluated in the target page
//!
//! Element functions are plain arrow functions; the wrappers below apply
//! them to `querySelector`/`querySelectorAll` results and return a JSON
//! envelope so "no element" is distinguishable from a `null` result.

use serde::Deserialize;
use serde_json::Value;

/// Submit a form element
pub const SUBMIT_FORM: &str = "form => form.submit()";

/// Count the matched nodes
pub const COUNT_NODES: &str = "nodes => nodes.length";

/// Resolved absolute `href` of each matched anchor
pub const ANCHOR_HREFS: &str = "anchors => anchors.map(a => a.href)";

/// Text content of one element
pub const TEXT_CONTENT: &str = "el => el.textContent";

/// Probe used to check an element exists
pub const EXISTS: &str = "el => true";

/// Result of a wrapped evaluation
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub found: bool,
    #[serde(default)]
    pub value: Value,
}

/// Encode a Rust string as a JS string literal
fn js_string(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// Expression applying `function` to the first element matching `selector`
pub(crate) fn on_selector(selector: &str, function: &str) -> String {
    format!(
        r"(() => {{
            const el = document.querySelector({selector});
            if (!el) {{ return {{ found: false }}; }}
            const value = ({function})(el);
            return {{ found: true, value: value === undefined ? null : value }};
        }})()",
        selector = js_string(selector),
    )
}

/// Expression applying `function` to an array of all elements matching `selector`
pub(crate) fn on_selector_all(selector: &str, function: &str) -> String {
    format!(
        r"(() => {{
            const nodes = Array.from(document.querySelectorAll({selector}));
            const value = ({function})(nodes);
            return {{ found: true, value: value === undefined ? null : value }};
        }})()",
        selector = js_string(selector),
    )
}

/// Expression assigning a JSON value to an element property
pub(crate) fn set_property(selector: &str, property: &str, value: &Value) -> String {
    format!(
        r"(() => {{
            const el = document.querySelector({selector});
            if (!el) {{ return {{ found: false }}; }}
            el[{property}] = {value};
            return {{ found: true }};
        }})()",
        selector = js_string(selector),
        property = js_string(property),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_is_escaped() {
        let expr = on_selector(r#"input[name="q"]"#, TEXT_CONTENT);
        assert!(expr.contains(r#"document.querySelector("input[name=\"q\"]")"#));
        assert!(expr.contains("(el => el.textContent)(el)"));
    }

    #[test]
    fn test_set_property_embeds_json_value() {
        let expr = set_property("#x", "value", &Value::String("a'b".to_string()));
        assert!(expr.contains(r#"el["value"] = "a'b";"#));
    }

    #[test]
    fn test_envelope_without_value_defaults_to_null() {
        let envelope: Envelope = serde_json::from_str(r#"{"found": false}"#).unwrap();
        assert!(!envelope.found);
        assert!(envelope.value.is_null());
    }
}
