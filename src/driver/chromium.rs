//! `PageDriver` over a chromiumoxide page

use chromiumoxide::cdp::browser_protocol::page::EventLoadEventFired;
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace};

use super::scripts::{self, Envelope};
use super::{NavigationWait, PageDriver};
use crate::error::{ProbeError, ProbeResult};

/// A chromiumoxide page plus the navigation timeout applied to it
#[derive(Debug, Clone)]
pub struct ChromiumPage {
    page: Page,
    navigation_timeout: Duration,
}

impl ChromiumPage {
    #[must_use]
    pub fn new(page: Page, navigation_timeout: Duration) -> Self {
        Self {
            page,
            navigation_timeout,
        }
    }

    /// Current page URL, `about:blank` when unavailable
    pub async fn current_url(&self) -> String {
        match self.page.url().await {
            Ok(Some(url)) => url,
            Ok(None) => "about:blank".to_string(),
            Err(e) => {
                trace!("Failed to get page URL (browser communication error): {}", e);
                "about:blank".to_string()
            }
        }
    }

    async fn evaluate_envelope(&self, expression: &str) -> ProbeResult<Envelope> {
        let result = self.page.evaluate(expression).await?;
        Ok(result.into_value::<Envelope>()?)
    }
}

impl PageDriver for ChromiumPage {
    async fn goto(&self, url: &str) -> ProbeResult<()> {
        debug!("Navigating to {}", url);
        self.page.goto(url).await?;
        Ok(())
    }

    async fn set_property(&self, selector: &str, property: &str, value: Value) -> ProbeResult<()> {
        let envelope = self
            .evaluate_envelope(&scripts::set_property(selector, property, &value))
            .await?;
        if !envelope.found {
            return Err(ProbeError::not_found(selector));
        }
        Ok(())
    }

    async fn type_into(&self, selector: &str, text: &str) -> ProbeResult<()> {
        // find_element errors are protocol-level; check presence separately so
        // a missing input surfaces as ElementNotFound.
        self.eval_on_selector(selector, scripts::EXISTS).await?;

        let element = self.page.find_element(selector).await?;
        element.focus().await?;
        element.type_str(text).await?;
        trace!("Typed {} characters into '{}'", text.chars().count(), selector);
        Ok(())
    }

    async fn eval_on_selector(&self, selector: &str, function: &str) -> ProbeResult<Value> {
        let envelope = self
            .evaluate_envelope(&scripts::on_selector(selector, function))
            .await?;
        if !envelope.found {
            return Err(ProbeError::not_found(selector));
        }
        Ok(envelope.value)
    }

    async fn eval_on_selector_all(&self, selector: &str, function: &str) -> ProbeResult<Value> {
        let envelope = self
            .evaluate_envelope(&scripts::on_selector_all(selector, function))
            .await?;
        Ok(envelope.value)
    }

    async fn wait_for_navigation(&self) -> ProbeResult<NavigationWait<'_>> {
        // Subscribing is the registration: load events fired after this point
        // are buffered in the stream even if nobody is polling yet.
        let loads = self.page.event_listener::<EventLoadEventFired>().await?;
        let timeout = self.navigation_timeout;

        Ok(Box::pin(async move {
            let mut loads = Box::pin(loads);
            match tokio::time::timeout(timeout, loads.next()).await {
                Ok(Some(_)) => {
                    debug!("Navigation completed");
                    Ok(())
                }
                Ok(None) => Err(ProbeError::Closed(
                    "load event stream ended before navigation completed".to_string(),
                )),
                Err(_) => Err(ProbeError::NavigationTimeout { timeout }),
            }
        }))
    }
}
