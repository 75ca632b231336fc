use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive, e.g. `arbtrans=debug`.
pub const LOG_ENV: &str = "ARBTRANS_LOG";

/// Filter used when `ARBTRANS_LOG` is unset: `warn`, raised by each `-v`.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr subscriber. Safe to call more than once.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
