//! Diagnostic logging

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Safe to call multiple times. Nothing is installed unless `RUST_LOG` is
/// set, so REPL output stays clean; e.g. `RUST_LOG=mylisp=trace` shows every
/// evaluation step on stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // A subscriber installed by an embedding program wins
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
