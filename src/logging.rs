//! Tracing subscriber setup for the runner binary and live tests

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter from `RUST_LOG`, defaulting to `info` with chromiumoxide's
/// handler and connection chatter turned off
fn default_filter() -> EnvFilter {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    ["chromiumoxide::handler=off", "chromiumoxide::conn=off"]
        .into_iter()
        .filter_map(|directive| directive.parse().ok())
        .fold(filter, EnvFilter::add_directive)
}

/// Install the global subscriber, writing to stderr
///
/// Returns `false` if one was already installed, which happens when several
/// tests in one binary each call this.
pub fn init_tracing() -> bool {
    tracing_subscriber::registry()
        .with(default_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .is_ok()
}
