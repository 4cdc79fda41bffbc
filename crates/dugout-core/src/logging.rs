// Tracing subscriber bootstrap shared by binaries.

use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "dugout=info,warn";

/// Install a global fmt subscriber writing to stderr, so stdout stays free
/// for machine-readable output.
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}
