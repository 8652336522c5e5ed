//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! deploy-profiles.toml (optional, defaults otherwise)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (project-wide semantic checks)
//!     → ProjectConfig (validated, immutable)
//!     → resolver (per-target resolution against environment bindings)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, parse_config, ConfigError};
pub use schema::{
    AccountsPolicy, CompilerConfig, CredentialFormat, FeePolicy, GasReporterConfig,
    ProjectConfig, TargetDefinition, VerificationConfig,
};
pub use validation::{validate_config, TargetSet, ValidationError};
