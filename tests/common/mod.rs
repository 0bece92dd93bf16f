//! Shared setup for the integration suites.

use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Initialize a tracing subscriber for test output.
///
/// Honors `RUST_LOG` (e.g. `RUST_LOG=casepath=trace cargo test`); without it
/// no subscriber is installed. Safe to call from every test, the subscriber
/// is only installed once.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
