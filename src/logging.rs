//! Diagnostic logging to stderr, controlled by `RUST_LOG`.
//!
//! Stdout is reserved for command output (including `--json`), so all
//! tracing output goes to stderr.

use std::sync::Once;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT_ONCE: Once = Once::new();

/// Install the tracing subscriber. Safe to call more than once.
///
/// Uses `RUST_LOG` when set. Otherwise defaults to `warn`, or to
/// `breadcrumb=debug` when `verbose` is true.
pub fn init(verbose: bool) {
    INIT_ONCE.call_once(|| {
        let default = if verbose { "breadcrumb=debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).compact())
            .try_init();
    });
}
