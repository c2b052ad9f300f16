use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber for the binary.
///
/// Filtering follows `RUST_LOG` and defaults to `info`. Output goes to
/// stderr so stdout stays reserved for invocation outcomes.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
