//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging through `tracing`
//! - Target names, variable names and counts are logged; values never are

pub mod logging;

pub use logging::init_logging;
