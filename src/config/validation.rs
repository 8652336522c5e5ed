//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce unique, non-empty target names
//! - Check that the default target exists
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Only project-wide structure is checked here. Per-target problems
//!   (missing bindings, bad fees, bad templates) surface when that target
//!   is resolved, so an unused misconfigured target never blocks the others
//! - Validation is pure function: ProjectConfig → Result<(), Vec<ValidationError>>

use std::collections::BTreeSet;

use thiserror::Error;

use crate::config::schema::{ProjectConfig, TargetDefinition};

/// A single semantic problem in the project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("duplicate target name '{0}'")]
    DuplicateTarget(String),

    #[error("target name must not be empty")]
    EmptyTargetName,

    #[error("default target '{0}' is not defined")]
    UnknownDefaultTarget(String),

    #[error("compiler version must not be empty")]
    EmptyCompilerVersion,
}

/// Validate a whole project configuration.
pub fn validate_config(config: &ProjectConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = target_name_errors(&config.targets);

    if config.compiler.version.trim().is_empty() {
        errors.push(ValidationError::EmptyCompilerVersion);
    }

    if config.target(&config.default_target).is_none() {
        errors.push(ValidationError::UnknownDefaultTarget(
            config.default_target.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn target_name_errors(targets: &[TargetDefinition]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();

    for target in targets {
        if target.name.is_empty() {
            errors.push(ValidationError::EmptyTargetName);
        } else if !seen.insert(target.name.as_str()) && reported.insert(target.name.as_str()) {
            errors.push(ValidationError::DuplicateTarget(target.name.clone()));
        }
    }

    errors
}

/// A set of targets with unique, non-empty names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSet {
    targets: Vec<TargetDefinition>,
}

impl TargetSet {
    /// Build a set, rejecting duplicate or empty names.
    pub fn new(targets: Vec<TargetDefinition>) -> Result<Self, Vec<ValidationError>> {
        let errors = target_name_errors(&targets);
        if errors.is_empty() {
            Ok(Self { targets })
        } else {
            Err(errors)
        }
    }

    /// The targets of a project.
    pub fn from_project(config: &ProjectConfig) -> Result<Self, Vec<ValidationError>> {
        Self::new(config.targets.clone())
    }

    pub fn get(&self, name: &str) -> Option<&TargetDefinition> {
        self.targets.iter().find(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetDefinition> {
        self.targets.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
