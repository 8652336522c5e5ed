//! Resolved profile types and error definitions.

use std::collections::BTreeMap;

use alloy::primitives::Address;
use serde::Serialize;
use thiserror::Error;

use crate::credentials::{Credential, CredentialError};
use crate::env::TemplateError;

/// Errors that can occur while resolving one target.
///
/// All of them are local to the target being resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A placeholder in the endpoint or fork template has no binding.
    #[error("missing binding: {0}")]
    MissingBinding(String),

    /// The target requires a signing credential that is not set.
    #[error("target '{target}' requires a signing credential but {}", missing_credential_reason(.var))]
    MissingCredential { target: String, var: Option<String> },

    /// The credential binding is set but has the wrong shape.
    #[error("malformed credential in {var}: {reason}")]
    MalformedCredential { var: String, reason: CredentialError },

    /// A fixed fee override is negative.
    #[error("invalid fee override {0}: must be non-negative")]
    InvalidFee(i64),

    /// A template could not be parsed.
    #[error("malformed {field} template: {reason}")]
    MalformedTemplate {
        field: &'static str,
        reason: TemplateError,
    },

    /// The substituted endpoint is not a URL. Only the template is kept,
    /// since the substituted text may embed an API key.
    #[error("invalid {field} URL from template '{template}': {reason}")]
    InvalidEndpoint {
        field: &'static str,
        template: String,
        reason: String,
    },

    /// No target with this name is defined.
    #[error("unknown target: {0}")]
    UnknownTarget(String),
}

fn missing_credential_reason(var: &Option<String>) -> String {
    match var {
        Some(var) => format!("{} is not set", var),
        None => "no credential source is configured".to_string(),
    }
}

/// Result type for resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Transaction fee to use for a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fee {
    /// Let the network price each transaction.
    NetworkDefault,
    /// Fixed amount in wei.
    Fixed(u64),
}

/// An account alias bound to a position in the account list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NamedAccount {
    pub index: usize,
    pub address: Option<Address>,
}

/// Fully resolved configuration for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedProfile {
    /// Target name.
    pub target: String,
    /// Endpoint URL with every placeholder substituted.
    pub endpoint: String,
    /// Upstream URL for a forking local node.
    pub fork: Option<String>,
    pub chain_id: Option<u64>,
    /// Signing accounts, possibly empty.
    pub accounts: Vec<Credential>,
    /// Aliases that point at an existing account.
    pub named_accounts: BTreeMap<String, NamedAccount>,
    pub fee: Fee,
}

impl ResolvedProfile {
    /// True when the profile can sign transactions.
    pub fn is_signing(&self) -> bool {
        !self.accounts.is_empty()
    }

    /// Account bound to an alias such as `deployer`.
    pub fn named_account(&self, name: &str) -> Option<&Credential> {
        self.named_accounts
            .get(name)
            .and_then(|named| self.accounts.get(named.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResolveError::MissingBinding("API_KEY".into());
        assert_eq!(err.to_string(), "missing binding: API_KEY");

        let err = ResolveError::MissingCredential {
            target: "polygon".into(),
            var: Some("PRIVATE_KEY".into()),
        };
        assert_eq!(
            err.to_string(),
            "target 'polygon' requires a signing credential but PRIVATE_KEY is not set"
        );

        let err = ResolveError::MissingCredential {
            target: "polygon".into(),
            var: None,
        };
        assert!(err.to_string().ends_with("no credential source is configured"));

        let err = ResolveError::InvalidFee(-5);
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    fn test_fee_serialization() {
        assert_eq!(
            serde_json::to_string(&Fee::NetworkDefault).unwrap(),
            "\"network-default\""
        );
        assert_eq!(
            serde_json::to_string(&Fee::Fixed(7)).unwrap(),
            "{\"fixed\":7}"
        );
    }
}
