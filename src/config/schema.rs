//! Configuration schema definitions.
//!
//! This module defines the project file structure: toolchain settings and
//! the named deployment targets. All types derive Serde traits for
//! deserialization from `deploy-profiles.toml`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for a contract project.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Target used when none is named on the command line.
    pub default_target: String,

    /// Compiler and optimizer settings.
    pub compiler: CompilerConfig,

    /// Block explorer verification settings.
    pub verification: VerificationConfig,

    /// Gas cost reporting settings.
    pub gas_reporter: GasReporterConfig,

    /// Account aliases, e.g. `deployer = 0`.
    pub named_accounts: BTreeMap<String, usize>,

    /// Deployment target definitions.
    pub targets: Vec<TargetDefinition>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            default_target: "local".to_string(),
            compiler: CompilerConfig::default(),
            verification: VerificationConfig::default(),
            gas_reporter: GasReporterConfig::default(),
            named_accounts: BTreeMap::from([("deployer".to_string(), 0)]),
            targets: default_targets(),
        }
    }
}

impl ProjectConfig {
    /// Find a target by name.
    pub fn target(&self, name: &str) -> Option<&TargetDefinition> {
        self.targets.iter().find(|t| t.name == name)
    }
}

fn default_targets() -> Vec<TargetDefinition> {
    vec![
        TargetDefinition::new("local", "http://127.0.0.1:8545")
            .with_chain_id(31337)
            .with_fork("https://white-evocative-emerald.matic.quiknode.pro/{QUIKNODE_API_KEY}/")
            .with_accounts(AccountsPolicy::IndexedAccountSet),
        TargetDefinition::new("buildbear", "https://rpc.buildbear.io/{BUILDBEAR_NODE_ID}")
            .with_credential(PRIVATE_KEY_VAR, CredentialFormat::Secp256k1)
            .with_accounts(AccountsPolicy::SingleCredential),
        TargetDefinition::new(
            "polygon",
            "https://polygon-mainnet.g.alchemy.com/v2/{ALCHEMY_POLYGON_API_KEY}",
        )
        .with_chain_id(137)
        .with_credential(PRIVATE_KEY_VAR, CredentialFormat::Secp256k1)
        .with_accounts(AccountsPolicy::SingleCredential)
        .with_fee(FeePolicy::Fixed(100_000_000_000)),
    ]
}

/// Environment variable holding the deployer's signing key.
pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";

/// Compiler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Compiler version string (e.g., "0.8.19").
    pub version: String,

    /// Enable the bytecode optimizer.
    pub optimizer_enabled: bool,

    /// Optimizer runs (expected number of contract invocations).
    pub optimizer_runs: u32,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            version: "0.8.19".to_string(),
            optimizer_enabled: true,
            optimizer_runs: 1000,
        }
    }
}

/// Block explorer verification configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Variable holding the explorer API key.
    pub api_key_var: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            api_key_var: "ETHERS_SCAN_API_KEY".to_string(),
        }
    }
}

/// Gas reporter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GasReporterConfig {
    /// Enabled state when `enabled_var` is unset.
    pub enabled: bool,

    /// Boolean flag variable that switches reporting on or off.
    pub enabled_var: String,

    /// Variable holding the price feed API key.
    pub api_key_var: String,

    /// Reporting currency code.
    pub currency: String,

    /// Variable overriding `currency`.
    pub currency_var: String,

    /// Endpoint used to look up the current gas price.
    pub gas_price_api: String,
}

impl Default for GasReporterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            enabled_var: "REPORT_GAS".to_string(),
            api_key_var: "COIN_MARKETCAP_API_KEY".to_string(),
            currency: "USD".to_string(),
            currency_var: "GAS_REPORT_CURRENCY".to_string(),
            gas_price_api: "https://api.etherscan.io/api?module=proxy&action=eth_gasPrice"
                .to_string(),
        }
    }
}

/// One deployment environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TargetDefinition {
    /// Unique target name.
    pub name: String,

    /// Endpoint URL template with `{VAR}` placeholders.
    pub endpoint: String,

    /// Upstream URL template a local node forks from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fork: Option<String>,

    /// Chain ID (e.g., 137 for Polygon, 31337 for a local node).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    /// Variable holding the signing key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_source: Option<String>,

    /// Fail resolution when the signing key is absent.
    #[serde(default)]
    pub credential_required: bool,

    /// Expected shape of the signing key.
    #[serde(default)]
    pub credential_format: CredentialFormat,

    /// Transaction fee policy.
    #[serde(default)]
    pub fee: FeePolicy,

    /// How the account list is built.
    #[serde(default)]
    pub accounts: AccountsPolicy,
}

impl TargetDefinition {
    /// A target with no credential, no chain id and the network's fee.
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            fork: None,
            chain_id: None,
            credential_source: None,
            credential_required: false,
            credential_format: CredentialFormat::default(),
            fee: FeePolicy::default(),
            accounts: AccountsPolicy::default(),
        }
    }

    pub fn with_fork(mut self, template: impl Into<String>) -> Self {
        self.fork = Some(template.into());
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn with_credential(mut self, var: impl Into<String>, format: CredentialFormat) -> Self {
        self.credential_source = Some(var.into());
        self.credential_format = format;
        self
    }

    pub fn require_credential(mut self) -> Self {
        self.credential_required = true;
        self
    }

    pub fn with_fee(mut self, fee: FeePolicy) -> Self {
        self.fee = fee;
        self
    }

    pub fn with_accounts(mut self, accounts: AccountsPolicy) -> Self {
        self.accounts = accounts;
        self
    }
}

/// Account list policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountsPolicy {
    /// Never any accounts; read-only profile.
    #[default]
    None,
    /// At most the one key named by `credential_source`.
    SingleCredential,
    /// Accounts supplied by an external index-to-credential mapping.
    IndexedAccountSet,
}

/// Expected shape of a signing key binding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialFormat {
    /// Hex digits with an optional `0x` prefix.
    #[default]
    Hex,
    /// A 32-byte secp256k1 private key in hex.
    Secp256k1,
}

/// Fee policy: the network's own pricing or a fixed amount in wei.
///
/// In TOML either `fee = "network-default"` (or `"auto"`) or `fee = 100000000000`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "FeePolicyRepr", into = "FeePolicyRepr")]
pub enum FeePolicy {
    #[default]
    NetworkDefault,
    /// Signed so that negative overrides survive parsing and are rejected
    /// by the resolver for the affected target only.
    Fixed(i64),
}

#[derive(Deserialize, Serialize)]
#[serde(untagged)]
enum FeePolicyRepr {
    Amount(i64),
    Keyword(String),
}

impl TryFrom<FeePolicyRepr> for FeePolicy {
    type Error = String;

    fn try_from(repr: FeePolicyRepr) -> Result<Self, Self::Error> {
        match repr {
            FeePolicyRepr::Amount(amount) => Ok(FeePolicy::Fixed(amount)),
            FeePolicyRepr::Keyword(keyword) => match keyword.as_str() {
                "network-default" | "auto" => Ok(FeePolicy::NetworkDefault),
                other => Err(format!(
                    "unknown fee policy '{}', expected \"network-default\" or an amount in wei",
                    other
                )),
            },
        }
    }
}

impl From<FeePolicy> for FeePolicyRepr {
    fn from(policy: FeePolicy) -> Self {
        match policy {
            FeePolicy::NetworkDefault => FeePolicyRepr::Keyword("network-default".to_string()),
            FeePolicy::Fixed(amount) => FeePolicyRepr::Amount(amount),
        }
    }
}
