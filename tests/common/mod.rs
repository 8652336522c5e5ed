//! Shared fixtures for integration tests.

use deploy_profiles::{AccountsPolicy, CredentialFormat, EnvironmentBindings, TargetDefinition};

/// Well-known test private key (Anvil's first account).
#[allow(dead_code)]
pub const ANVIL_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Build bindings from string pairs.
pub fn env(pairs: &[(&str, &str)]) -> EnvironmentBindings {
    EnvironmentBindings::from_pairs(pairs.iter().copied())
}

/// The staging target used throughout the scenarios.
#[allow(dead_code)]
pub fn staging() -> TargetDefinition {
    TargetDefinition::new("staging", "https://rpc.example/{API_KEY}")
        .with_credential("SIGNER_KEY", CredentialFormat::Hex)
        .with_accounts(AccountsPolicy::SingleCredential)
}

/// A read-only target that never looks at the environment.
#[allow(dead_code)]
pub fn read_only() -> TargetDefinition {
    TargetDefinition::new("archive", "https://archive.example/rpc")
}
