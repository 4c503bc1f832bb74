//! Diagnostic logging.
//!
//! Console status lines for the user go through the `info!`/`success!`/
//! `warning!`/`error!` macros. Everything else is emitted with `tracing` and
//! written to stderr, filtered by `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "m3u2spotify=info,tower_http=info,warn";

/// Initialize the tracing subscriber.
///
/// Default log levels when `RUST_LOG` is unset:
/// - `m3u2spotify` modules: INFO
/// - `tower_http` request traces: INFO
/// - Other crates: WARN
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
