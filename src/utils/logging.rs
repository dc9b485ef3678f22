use tracing_subscriber::EnvFilter;

/// Environment variable holding the diagnostic log filter (e.g. `debug`).
pub const LOG_ENV: &str = "TASKLOG_LOG";

/// Install the stderr diagnostic logger. Defaults to warnings only so that
/// normal CLI output stays clean.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=warn",
            env!("CARGO_PKG_NAME").replace('-', "_")
        ))
    });

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
