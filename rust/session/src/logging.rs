use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber for binaries embedding the session
/// engine. `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,buzzboard_session=debug,buzzboard_engine=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
