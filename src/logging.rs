//! Diagnostics logging.
//!
//! `tracing` events carry request-level detail (endpoint, status, transport
//! causes). They are written to stderr and filtered by `RUST_LOG`, which
//! defaults to `error` so an ordinary session stays quiet.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "error";

/// Installs the global subscriber.
///
/// `verbose` raises the crate's own events to `debug` on top of whatever
/// `RUST_LOG` selects. Calling this twice is harmless: the second call fails
/// to install and is ignored.
pub fn init(verbose: bool) {
    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if verbose && let Ok(directive) = "quip_cli=debug".parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(!crate::output::is_no_color());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
