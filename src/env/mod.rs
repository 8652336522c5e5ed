//! Environment bindings snapshot.
//!
//! # Data Flow
//! ```text
//! process environment ──┐
//!                       ├─→ EnvironmentBindings (captured once, read-only)
//! .env file (optional) ─┘        → template.rs (endpoint placeholders)
//!                                → resolver (credentials, service keys)
//! ```
//!
//! # Design Decisions
//! - Captured once at startup and never mutated; the resolver only reads it
//! - Process variables take precedence over `.env` entries
//! - Reading a `.env` file never touches the process environment
//! - Values are secrets: `Debug` lists variable names only

pub mod template;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use thiserror::Error;

pub use template::{Template, TemplateError};

/// Errors while capturing bindings.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The dotenv file exists but could not be read or parsed.
    #[error("failed to read {path}: {source}")]
    Dotenv {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
}

/// Immutable mapping from variable name to value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvironmentBindings {
    vars: BTreeMap<String, String>,
}

impl EnvironmentBindings {
    /// An empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let mut vars = BTreeMap::new();
        for (key, value) in std::env::vars_os() {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    vars.insert(key, value);
                }
                (Ok(key), Err(_)) => {
                    tracing::debug!(variable = %key, "Skipping non UTF-8 environment value");
                }
                _ => {}
            }
        }
        Self { vars }
    }

    /// Capture the process environment, then fill gaps from a dotenv file.
    ///
    /// A missing file is not an error.
    pub fn capture(dotenv: Option<&Path>) -> Result<Self, EnvError> {
        let bindings = Self::from_process();
        match dotenv {
            Some(path) => bindings.merge_dotenv(path),
            None => Ok(bindings),
        }
    }

    /// Return a new snapshot with entries from `path` added where absent.
    pub fn merge_dotenv(&self, path: &Path) -> Result<Self, EnvError> {
        let to_env_error = |source: dotenvy::Error| EnvError::Dotenv {
            path: path.display().to_string(),
            source,
        };

        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(e) if e.not_found() => {
                tracing::debug!(path = %path.display(), "No dotenv file found");
                return Ok(self.clone());
            }
            Err(e) => return Err(to_env_error(e)),
        };

        let mut vars = self.vars.clone();
        let mut loaded = 0usize;
        for item in iter {
            let (key, value) = item.map_err(to_env_error)?;
            if !vars.contains_key(&key) {
                vars.insert(key, value);
                loaded += 1;
            }
        }

        tracing::debug!(path = %path.display(), loaded, "Dotenv file merged");
        Ok(Self { vars })
    }

    /// Look up a binding. Absence is a normal state.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Look up a binding, treating an empty value as absent.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Variable names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvironmentBindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl fmt::Debug for EnvironmentBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentBindings")
            .field("names", &self.vars.keys().collect::<Vec<_>>())
            .finish()
    }
}
