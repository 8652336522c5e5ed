//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level at runtime
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Logs go to stderr; stdout is reserved for resolved output
//! - `RUST_LOG` wins over the level passed on the command line

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor a level is given.
pub const DEFAULT_LEVEL: &str = "warn";

/// Build the filter for `level`, honouring `RUST_LOG` first.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("deploy_profiles={},warn", level).into())
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(level: &str) {
    let result = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    if result.is_err() {
        tracing::debug!("Logging already initialized");
    }
}
