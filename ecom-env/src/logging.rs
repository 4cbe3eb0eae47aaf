use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Respects `RUST_LOG`, falling back to `info`. Logs go to stderr so that
/// rendered output on stdout can be piped into a file. Calling it again is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
