//! Tracing setup for the `clerk` binary

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a tracing filter (e.g. `clerk=debug`)
pub const LOG_ENV: &str = "BOOKSTORE_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";
const VERBOSE_LOG_FILTER: &str = "clerk=debug,warn";

/// Filter used when `BOOKSTORE_LOG` is unset or invalid
fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::new(DEFAULT_LOG_FILTER)
    }
}

/// Install a stderr subscriber
///
/// Output goes to stderr so that command output on stdout stays parseable.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default_filter(verbose));

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init();
}
