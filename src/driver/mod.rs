//! Page-scripting surface the probes are written against
//!
//! `PageDriver` is the seam between the query protocol and a concrete
//! browser. `ChromiumPage` drives Chrome over CDP; tests substitute an
//! in-memory page.

mod chromium;
pub mod scripts;

pub use chromium::ChromiumPage;

use futures::future::BoxFuture;
use serde_json::Value;
use std::future::Future;

use crate::error::ProbeResult;

/// A registered navigation watcher
///
/// Resolves when the page finishes loading a new document, or fails with
/// `ProbeError::NavigationTimeout`.
pub type NavigationWait<'a> = BoxFuture<'a, ProbeResult<()>>;

/// Browser page operations consumed by the probes
///
/// Single-element operations fail with `ProbeError::ElementNotFound` when the
/// selector matches nothing. Collection operations never fail on an empty
/// match; the function receives an empty array.
pub trait PageDriver {
    /// Navigate to `url` and wait for it to load
    fn goto(&self, url: &str) -> impl Future<Output = ProbeResult<()>> + Send;

    /// Assign `value` to the `property` of the first element matching `selector`
    fn set_property(
        &self,
        selector: &str,
        property: &str,
        value: Value,
    ) -> impl Future<Output = ProbeResult<()>> + Send;

    /// Focus the element matching `selector` and type `text` as key events
    fn type_into(&self, selector: &str, text: &str) -> impl Future<Output = ProbeResult<()>> + Send;

    /// Call the JS `function` with the first element matching `selector`
    ///
    /// `undefined` results come back as `Value::Null`.
    fn eval_on_selector(
        &self,
        selector: &str,
        function: &str,
    ) -> impl Future<Output = ProbeResult<Value>> + Send;

    /// Call the JS `function` with an array of every element matching `selector`
    fn eval_on_selector_all(
        &self,
        selector: &str,
        function: &str,
    ) -> impl Future<Output = ProbeResult<Value>> + Send;

    /// Register a watcher for the next navigation
    ///
    /// The outer future completes once the watcher is live, so any action
    /// started afterwards cannot finish navigating unobserved.
    fn wait_for_navigation(&self)
    -> impl Future<Output = ProbeResult<NavigationWait<'_>>> + Send;
}
