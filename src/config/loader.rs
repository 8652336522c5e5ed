//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProjectConfig;
use crate::config::validation::{validate_config, ValidationError};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "deploy-profiles.toml";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = parse_config(&content)?;

    tracing::info!(
        path = %path.display(),
        targets = config.targets.len(),
        default_target = %config.default_target,
        "Configuration loaded"
    );
    Ok(config)
}

/// Load `path` if given, else `deploy-profiles.toml` in `dir` if present,
/// else the built-in defaults.
pub fn load_or_default(path: Option<&Path>, dir: &Path) -> Result<ProjectConfig, ConfigError> {
    if let Some(path) = path {
        return load_config(path);
    }

    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    if candidate.is_file() {
        return load_config(&candidate);
    }

    tracing::debug!("No configuration file found, using built-in defaults");
    let config = ProjectConfig::default();
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
