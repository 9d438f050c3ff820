use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `daybook_core=debug`.
const LOG_ENV: &str = "DAYBOOK_LOG";

/// Install the stderr subscriber. `--verbose` raises the default level from warn to debug.
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // a subscriber may already be set (tests)
    let _ = subscriber.try_init();
}
