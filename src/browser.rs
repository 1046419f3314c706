//! Browser process ownership
//!
//! Ties a chromiumoxide `Browser` to its event-handler task and temporary
//! profile directory so all three are released together.

use anyhow::Result;
use chromiumoxide::browser::Browser;
use std::path::PathBuf;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::browser_setup;
use crate::config::ProbeConfig;

/// A running browser, the task pumping its CDP events, and its profile
///
/// Dropping the wrapper aborts the event task; a stale task would keep
/// polling a dead websocket.
pub struct BrowserWrapper {
    browser: Browser,
    events: JoinHandle<()>,
    /// Profile to delete once Chrome has exited; `None` once removed or kept
    owned_profile: Option<PathBuf>,
}

impl BrowserWrapper {
    pub(crate) fn new(browser: Browser, events: JoinHandle<()>, profile: PathBuf) -> Self {
        Self {
            browser,
            events,
            owned_profile: Some(profile),
        }
    }

    /// Find or download Chrome and launch it with `config`
    ///
    /// A profile directory named in the config belongs to the caller and is
    /// left on disk; only the per-process temp profile is removed.
    pub async fn launch(config: &ProbeConfig) -> Result<Self> {
        let (browser, handler, user_data_dir) = browser_setup::launch_browser(config).await?;
        let mut wrapper = Self::new(browser, handler, user_data_dir);
        if config.chrome_data_dir().is_some() {
            wrapper.owned_profile = None;
        }
        Ok(wrapper)
    }

    pub(crate) fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Close the browser, wait for the process to exit, then remove the profile
    ///
    /// Safe to call more than once.
    pub async fn shutdown(&mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        self.remove_profile();
    }

    /// Delete the owned profile directory (blocking)
    ///
    /// Chrome must have exited first or it may still hold files inside.
    pub fn remove_profile(&mut self) {
        let Some(profile) = self.owned_profile.take() else {
            return;
        };
        match std::fs::remove_dir_all(&profile) {
            Ok(()) => debug!("Removed browser profile {}", profile.display()),
            Err(e) => warn!("Could not remove browser profile {}: {}", profile.display(), e),
        }
    }
}

impl Drop for BrowserWrapper {
    fn drop(&mut self) {
        self.events.abort();
        if self.owned_profile.is_some() {
            warn!("Browser dropped without shutdown; removing its profile now");
            self.remove_profile();
        }
    }
}
