use tracing_subscriber::EnvFilter;

/// Installs the diagnostic log subscriber, writing to standard error.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` selects `debug` for this
/// crate, and the default is `warn`. Calling this more than once is a no-op.
pub fn init(verbose: bool) {
    let fallback = if verbose { "token_rename=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
