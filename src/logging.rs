use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber.
///
/// Logs go to stderr so they never interleave with the menu on stdout.
/// Verbosity follows `RUST_LOG` and defaults to `warn`, e.g.
/// `RUST_LOG=food_orders_lib=debug` to see connections and settings.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second install (e.g. from tests) is not an error worth surfacing
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
