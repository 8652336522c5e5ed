//! Toolchain settings projection.
//!
//! Copies the fixed compiler settings and reads the optional service keys.
//! An absent key switches the service off; it is never an error.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::config::schema::ProjectConfig;
use crate::env::EnvironmentBindings;

/// API key state for an optional external service.
#[derive(Clone, PartialEq, Eq)]
pub enum ServiceKey {
    Disabled,
    Enabled(String),
}

impl ServiceKey {
    /// Read a key binding; unset or empty means disabled.
    pub fn from_binding(env: &EnvironmentBindings, var: &str) -> Self {
        match env.get_non_empty(var) {
            Some(key) => ServiceKey::Enabled(key.to_string()),
            None => ServiceKey::Disabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, ServiceKey::Enabled(_))
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            ServiceKey::Enabled(key) => Some(key),
            ServiceKey::Disabled => None,
        }
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKey::Disabled => f.write_str("Disabled"),
            ServiceKey::Enabled(_) => f.write_str("Enabled(<redacted>)"),
        }
    }
}

impl Serialize for ServiceKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if self.is_enabled() { "enabled" } else { "disabled" })
    }
}

/// Settings handed to the gas reporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GasReporterSettings {
    pub enabled: bool,
    pub api_key: ServiceKey,
    pub currency: String,
    pub gas_price_api: String,
}

/// Settings handed to the compiler and the auxiliary services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainSettings {
    pub compiler_version: String,
    pub optimizer_enabled: bool,
    pub optimizer_runs: u32,
    /// Block explorer verification key.
    pub verification: ServiceKey,
    pub gas_reporter: GasReporterSettings,
}

/// Project the toolchain settings of `config` against `env`.
pub fn resolve_toolchain_settings(
    config: &ProjectConfig,
    env: &EnvironmentBindings,
) -> ToolchainSettings {
    let reporter = &config.gas_reporter;

    let enabled = match env.get_non_empty(&reporter.enabled_var) {
        Some(raw) => parse_flag(raw).unwrap_or_else(|| {
            tracing::warn!(
                variable = %reporter.enabled_var,
                value = %raw,
                default = reporter.enabled,
                "Unrecognized boolean flag, using configured default"
            );
            reporter.enabled
        }),
        None => reporter.enabled,
    };

    let currency = env
        .get_non_empty(&reporter.currency_var)
        .unwrap_or(reporter.currency.as_str())
        .to_ascii_uppercase();

    let settings = ToolchainSettings {
        compiler_version: config.compiler.version.clone(),
        optimizer_enabled: config.compiler.optimizer_enabled,
        optimizer_runs: config.compiler.optimizer_runs,
        verification: ServiceKey::from_binding(env, &config.verification.api_key_var),
        gas_reporter: GasReporterSettings {
            enabled,
            api_key: ServiceKey::from_binding(env, &reporter.api_key_var),
            currency,
            gas_price_api: reporter.gas_price_api.clone(),
        },
    };

    tracing::debug!(
        compiler_version = %settings.compiler_version,
        verification = settings.verification.is_enabled(),
        gas_reporter = settings.gas_reporter.enabled,
        "Toolchain settings resolved"
    );

    settings
}

/// Parse a boolean environment flag.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
