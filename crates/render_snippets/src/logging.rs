// crates/render_snippets/src/logging.rs

use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. `RUST_LOG` is honored unless `verbose`
/// forces debug output; the default level is `warn`.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed (tests); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
