// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes tracing output for the CLI. Filter levels come from the
/// `RUST_LOG` environment variable, defaulting to "info". Targets are
/// suppressed since the binary is a single pipeline.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(false).init();

    tracing::debug!("Logging initialized");
}
