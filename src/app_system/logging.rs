/// Centralized tracing configuration.
///
/// - `RUST_LOG` controls verbosity (defaults to `info`)
/// - uptime timer shows how long each operation takes
/// - compact formatter keeps one line per event
///
/// ```bash
/// RUST_LOG=debug grubdash                       # every stage decision
/// RUST_LOG=grubdash::pipeline=debug grubdash    # pipeline only
/// ```
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
