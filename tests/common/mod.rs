//! Test harness helpers shared by the integration tests.

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

/// Quiet unless asked: only store warnings (dropped updates) get through.
const DEFAULT_FILTER: &str = "flip_scorecard=warn";

static LOGGING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_env("TEST_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Something else in this binary may already own the global subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(true)
        .without_time()
        .compact()
        .try_init();
});

/// Route store and scorecard tracing into the test output.
///
/// `TEST_LOG=flip_scorecard=debug` shows every mutation and broadcast.
pub fn init_logging() {
    Lazy::force(&LOGGING);
}
