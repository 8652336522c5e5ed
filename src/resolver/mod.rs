//! Profile resolution subsystem.
//!
//! # Data Flow
//! ```text
//! TargetDefinition ─┐
//!                   ├─→ target.rs (templates, credential, accounts, fee)
//! EnvironmentBindings┘        → ResolvedProfile (per target, on demand)
//!
//! ProjectConfig ────┐
//!                   ├─→ toolchain.rs → ToolchainSettings
//! EnvironmentBindings┘
//! ```
//!
//! # Constraints
//! - Synchronous and side-effect free apart from logging
//! - Never logs secret values
//! - Profiles are recomputed each run; nothing is cached

pub mod target;
pub mod toolchain;
pub mod types;

pub use target::{
    resolve_all, resolve_selected, resolve_target, AccountIndex, NoIndexedAccounts, Resolver,
    MAX_INDEXED_ACCOUNTS,
};
pub use toolchain::{resolve_toolchain_settings, GasReporterSettings, ServiceKey, ToolchainSettings};
pub use types::{Fee, NamedAccount, ResolveError, ResolveResult, ResolvedProfile};
