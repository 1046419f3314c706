//! A launched browser with one page parked on the search home page
//!
//! The same page is reused by every query in a run; each scenario starts by
//! issuing a fresh query on whatever page the previous one left behind.

use anyhow::{Context, Result};
use tracing::info;

use crate::browser::BrowserWrapper;
use crate::config::ProbeConfig;
use crate::driver::{ChromiumPage, PageDriver};

/// Browser process plus the page the probes drive
pub struct SearchSession {
    wrapper: BrowserWrapper,
    page: ChromiumPage,
}

impl SearchSession {
    /// Launch a browser and open the configured home URL
    ///
    /// # Errors
    ///
    /// Returns an error if Chrome cannot be found, downloaded or launched, or
    /// the home page fails to load. The browser is cleaned up on failure.
    pub async fn open(config: &ProbeConfig) -> Result<Self> {
        let mut wrapper = BrowserWrapper::launch(config).await?;

        let page = match wrapper.browser().new_page("about:blank").await {
            Ok(page) => ChromiumPage::new(page, config.navigation_timeout()),
            Err(e) => {
                wrapper.shutdown().await;
                return Err(e).context("Failed to open a browser tab");
            }
        };

        if let Err(e) = page.goto(config.home_url()).await {
            wrapper.shutdown().await;
            return Err(e).with_context(|| format!("Failed to open {}", config.home_url()));
        }
        info!("Opened search home page {}", config.home_url());

        Ok(Self { wrapper, page })
    }

    /// Page driver for queries and extraction
    #[must_use]
    pub fn driver(&self) -> &ChromiumPage {
        &self.page
    }

    /// Close the browser and remove its temporary profile
    pub async fn shutdown(mut self) {
        info!("Shutting down search session");
        self.wrapper.shutdown().await;
    }
}
