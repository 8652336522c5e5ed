//! End-to-end flow: project file and dotenv file to resolved profiles.

use std::fs;

use deploy_profiles::config::{load_or_default, parse_config};
use deploy_profiles::resolver::{Fee, ServiceKey};
use deploy_profiles::{
    resolve_selected, resolve_toolchain_settings, EnvironmentBindings, ProjectConfig,
    ResolveError,
};

mod common;

const PROJECT: &str = r#"
default_target = "staging"

[gas_reporter]
currency = "eur"

[[targets]]
name = "staging"
endpoint = "https://rpc.example/{API_KEY}"
credential_source = "SIGNER_KEY"
accounts = "single-credential"

[[targets]]
name = "production"
endpoint = "https://mainnet.example/{MAINNET_KEY}"
chain_id = 1
fee = -10
credential_source = "SIGNER_KEY"
accounts = "single-credential"
"#;

#[test]
fn test_project_file_and_dotenv() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("deploy-profiles.toml"), PROJECT).unwrap();
    let dotenv = dir.path().join(".env");
    fs::write(&dotenv, "API_KEY=from-dotenv\nSIGNER_KEY=0xdead\n").unwrap();

    let config = load_or_default(None, dir.path()).unwrap();
    let env = common::env(&[("API_KEY", "abc123")])
        .merge_dotenv(&dotenv)
        .unwrap();

    // Default target, process value wins over the dotenv value.
    let profile = resolve_selected(&config, None, &env).unwrap();
    assert_eq!(profile.target, "staging");
    assert_eq!(profile.endpoint, "https://rpc.example/abc123");
    assert_eq!(profile.accounts.len(), 1);
    assert!(profile.named_accounts.contains_key("deployer"));

    // The misconfigured production target only fails when invoked.
    let err = resolve_selected(&config, Some("production"), &env).unwrap_err();
    assert_eq!(err, ResolveError::MissingBinding("MAINNET_KEY".into()));

    let settings = resolve_toolchain_settings(&config, &env);
    assert_eq!(settings.gas_reporter.currency, "EUR");
    assert_eq!(settings.compiler_version, "0.8.19");
}

#[test]
fn test_built_in_targets() {
    let config = ProjectConfig::default();
    let env = common::env(&[
        ("QUIKNODE_API_KEY", "qn"),
        ("BUILDBEAR_NODE_ID", "node-7"),
        ("PRIVATE_KEY", common::ANVIL_KEY),
        ("ETHERS_SCAN_API_KEY", "scan"),
    ]);

    let local = resolve_selected(&config, None, &env).unwrap();
    assert_eq!(local.endpoint, "http://127.0.0.1:8545");
    assert_eq!(
        local.fork.as_deref(),
        Some("https://white-evocative-emerald.matic.quiknode.pro/qn/")
    );

    let buildbear = resolve_selected(&config, Some("buildbear"), &env).unwrap();
    assert_eq!(buildbear.endpoint, "https://rpc.buildbear.io/node-7");
    assert_eq!(buildbear.fee, Fee::NetworkDefault);
    assert_eq!(
        buildbear.named_account("deployer").map(|c| c.expose()),
        Some(common::ANVIL_KEY)
    );

    // Polygon's provider key is absent; the other targets are unaffected.
    assert_eq!(
        resolve_selected(&config, Some("polygon"), &env).unwrap_err(),
        ResolveError::MissingBinding("ALCHEMY_POLYGON_API_KEY".into())
    );

    let settings = resolve_toolchain_settings(&config, &env);
    assert_eq!(settings.verification, ServiceKey::Enabled("scan".into()));
    assert!(!settings.gas_reporter.api_key.is_enabled());
}

#[test]
fn test_built_in_targets_without_private_key() {
    let config = ProjectConfig::default();
    let env = common::env(&[("BUILDBEAR_NODE_ID", "node-7")]);

    let profile = resolve_selected(&config, Some("buildbear"), &env).unwrap();
    assert!(profile.accounts.is_empty());
    assert!(profile.named_accounts.is_empty());
}

#[test]
fn test_profile_json_hides_secrets() {
    let config = ProjectConfig::default();
    let env = EnvironmentBindings::from_pairs([
        ("BUILDBEAR_NODE_ID", "node-7"),
        ("PRIVATE_KEY", common::ANVIL_KEY),
    ]);

    let profile = resolve_selected(&config, Some("buildbear"), &env).unwrap();
    let json = serde_json::to_string(&profile).unwrap();
    assert!(!json.contains(common::ANVIL_KEY));
    assert!(json
        .to_lowercase()
        .contains("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"));
}

#[test]
fn test_required_credential_on_indexed_target() {
    let config = parse_config(
        r#"
default_target = "dev"

[[targets]]
name = "dev"
endpoint = "http://127.0.0.1:8545"
credential_source = "SIGNER_KEY"
credential_required = true
accounts = "indexed-account-set"
"#,
    )
    .unwrap();

    let absent = resolve_selected(&config, None, &common::env(&[])).unwrap_err();
    assert_eq!(
        absent,
        ResolveError::MissingCredential {
            target: "dev".into(),
            var: Some("SIGNER_KEY".into()),
        }
    );

    let malformed =
        resolve_selected(&config, None, &common::env(&[("SIGNER_KEY", "not hex")])).unwrap_err();
    assert!(matches!(malformed, ResolveError::MalformedCredential { .. }));

    let profile = resolve_selected(&config, None, &common::env(&[("SIGNER_KEY", "0xdead")])).unwrap();
    assert!(profile.accounts.is_empty());
}
