//! Chrome discovery, download and launch
//!
//! Finds a local Chrome/Chromium (or fetches a managed one) and launches it
//! with the probe's window, timeout and headless settings.

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use futures::StreamExt;
use std::path::PathBuf;
use std::process::Command;
use tokio::task::{self, JoinHandle};
use tracing::{debug, error, info, trace, warn};

use crate::config::ProbeConfig;
use crate::utils::constants::CHROME_USER_AGENT;

/// Environment variable that overrides every other discovery method
pub const CHROMIUM_PATH_ENV: &str = "CHROMIUM_PATH";

/// Launch arguments applied to every probe browser
const LAUNCH_ARGS: &[&str] = &[
    "--disable-blink-features=AutomationControlled",
    "--disable-infobars",
    "--disable-notifications",
    "--disable-extensions",
    "--disable-popup-blocking",
    "--disable-background-networking",
    "--disable-background-timer-throttling",
    "--disable-backgrounding-occluded-windows",
    "--disable-breakpad",
    "--disable-features=TranslateUI",
    "--disable-hang-monitor",
    "--disable-prompt-on-repost",
    "--disable-setuid-sandbox",
    "--no-first-run",
    "--no-default-browser-check",
    "--no-sandbox",
    "--password-store=basic",
    "--use-mock-keychain",
    "--hide-scrollbars",
    "--mute-audio",
    "--lang=en-US",
];

fn candidate_paths() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            r"%LOCALAPPDATA%\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files\Chromium\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "~/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "~/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
            "/usr/local/bin/chromium",
            "/opt/google/chrome/chrome",
        ]
    }
}

/// Expand a leading `~/` and Windows `%VAR%` tokens in a candidate path
///
/// Unknown variables are left as written. Returns `None` when the home
/// directory is needed but unknown.
fn expand_candidate(raw: &str) -> Option<PathBuf> {
    if let Some(rest) = raw.strip_prefix("~/") {
        return dirs::home_dir().map(|home| home.join(rest));
    }
    if !raw.contains('%') {
        return Some(PathBuf::from(raw));
    }

    let mut expanded = String::with_capacity(raw.len());
    let mut parts = raw.split('%');
    if let Some(head) = parts.next() {
        expanded.push_str(head);
    }
    // After the first split, parts alternate between a variable name and the
    // literal text that follows its closing '%'.
    let rest: Vec<&str> = parts.collect();
    let mut i = 0;
    while i < rest.len() {
        let name = rest[i];
        match rest.get(i + 1) {
            Some(literal) => {
                match std::env::var(name) {
                    Ok(value) if !name.is_empty() => expanded.push_str(&value),
                    _ => {
                        expanded.push('%');
                        expanded.push_str(name);
                        expanded.push('%');
                    }
                }
                expanded.push_str(literal);
                i += 2;
            }
            None => {
                // Unterminated token
                expanded.push('%');
                expanded.push_str(name);
                i += 1;
            }
        }
    }
    Some(PathBuf::from(expanded))
}

/// Names probed with `which` when no well-known path exists
const PATH_COMMANDS: &[&str] = &["chromium", "chromium-browser", "google-chrome", "chrome"];

fn from_env_override() -> Option<PathBuf> {
    let path = PathBuf::from(std::env::var_os(CHROMIUM_PATH_ENV)?);
    if path.exists() {
        return Some(path);
    }
    warn!(
        "{CHROMIUM_PATH_ENV}={} does not exist; ignoring it",
        path.display()
    );
    None
}

fn from_known_locations() -> Option<PathBuf> {
    candidate_paths()
        .iter()
        .filter_map(|raw| expand_candidate(raw))
        .find(|path| path.exists())
}

fn from_search_path() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        return None;
    }
    PATH_COMMANDS.iter().find_map(|name| {
        let output = Command::new("which").arg(name).output().ok()?;
        if !output.status.success() {
            return None;
        }
        let resolved = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!resolved.is_empty()).then(|| PathBuf::from(resolved))
    })
}

/// Locate an installed Chrome or Chromium
///
/// Checks `CHROMIUM_PATH`, then the platform's usual install locations, then
/// `which` on Unix.
pub async fn find_browser_executable() -> Result<PathBuf> {
    let found = from_env_override()
        .or_else(from_known_locations)
        .or_else(from_search_path);

    match found {
        Some(path) => {
            info!("Using browser executable {}", path.display());
            Ok(path)
        }
        None => Err(anyhow::anyhow!(
            "no Chrome or Chromium installation found (set {CHROMIUM_PATH_ENV} to override)"
        )),
    }
}

/// Directory holding the managed Chromium download
fn managed_browser_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let tmp = std::env::temp_dir();
        warn!("No user cache directory; storing Chromium under {}", tmp.display());
        tmp
    });
    base.join("search_probe").join("chromium")
}

/// Fetch a Chromium build into the user cache and return its executable
pub async fn download_managed_browser() -> Result<PathBuf> {
    let target = managed_browser_dir();
    info!("Fetching managed Chromium into {}", target.display());

    std::fs::create_dir_all(&target)
        .with_context(|| format!("Failed to create {}", target.display()))?;

    let options = BrowserFetcherOptions::builder()
        .with_path(&target)
        .build()
        .context("Invalid browser fetcher options")?;
    let installed = BrowserFetcher::new(options)
        .fetch()
        .await
        .context("Chromium download failed")?;

    debug!("Managed Chromium ready in {}", installed.folder_path.display());
    Ok(installed.executable_path)
}

/// Handler errors Chrome triggers by sending CDP events chromiumoxide cannot decode
///
/// Reference: https://github.com/mattsse/chromiumoxide/issues/167
fn is_benign_handler_error(message: &str) -> bool {
    message.contains("data did not match any variant of untagged enum Message")
        || message.contains("Failed to deserialize WS response")
}

/// Launch a browser configured from `config`
///
/// Returns the browser, its tracked event-handler task, and the profile
/// directory that must be removed after the browser exits.
pub async fn launch_browser(config: &ProbeConfig) -> Result<(Browser, JoinHandle<()>, PathBuf)> {
    let executable = match find_browser_executable().await {
        Ok(path) => path,
        Err(e) => {
            warn!("{e}; falling back to a managed download");
            download_managed_browser().await?
        }
    };

    let profile_dir = config.chrome_data_dir().cloned().unwrap_or_else(|| {
        std::env::temp_dir().join(format!("search_probe_chrome_{}", std::process::id()))
    });
    std::fs::create_dir_all(&profile_dir)
        .with_context(|| format!("Failed to create profile dir {}", profile_dir.display()))?;

    let (width, height) = config.window_size();
    let mut builder = BrowserConfigBuilder::default()
        .chrome_executable(executable)
        .user_data_dir(profile_dir.clone())
        .request_timeout(config.request_timeout())
        .window_size(width, height)
        .arg(format!("--user-agent={CHROME_USER_AGENT}"));
    builder = LAUNCH_ARGS.iter().fold(builder, |b, arg| b.arg(*arg));
    builder = if config.headless() {
        builder.headless_mode(HeadlessMode::default())
    } else {
        builder.with_head()
    };
    let browser_config = builder
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid browser launch config: {e}"))?;

    info!("Launching browser (headless={})", config.headless());
    let (browser, mut events) = Browser::launch(browser_config)
        .await
        .context("Browser process failed to start")?;

    let handler = task::spawn(async move {
        while let Some(event) = events.next().await {
            match event {
                Err(e) if is_benign_handler_error(&e.to_string()) => {
                    trace!("Ignoring undecodable CDP message: {}", e);
                }
                Err(e) => error!("CDP handler error: {:?}", e),
                Ok(()) => {}
            }
        }
        debug!("CDP handler stream ended");
    });

    Ok((browser, handler, profile_dir))
}
