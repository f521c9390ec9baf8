//! Logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "warn,apiprobe=debug,apiprobe_client=debug";

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout only carries the report. `RUST_LOG` overrides
/// the default filter.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
