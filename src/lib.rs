//! Deployment profile resolution for contract toolchains.
//!
//! Turns named deployment targets plus a snapshot of environment bindings
//! into one validated [`ResolvedProfile`] per target, and one
//! [`ToolchainSettings`] for the compiler and auxiliary services.

pub mod config;
pub mod credentials;
pub mod env;
pub mod observability;
pub mod resolver;

pub use config::schema::{AccountsPolicy, CredentialFormat, FeePolicy, ProjectConfig, TargetDefinition};
pub use config::validation::TargetSet;
pub use credentials::Credential;
pub use env::EnvironmentBindings;
pub use resolver::{
    resolve_all, resolve_selected, resolve_target, resolve_toolchain_settings, ResolveError,
    ResolvedProfile, Resolver, ToolchainSettings,
};
