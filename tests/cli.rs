//! The command line binary against a project directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

const PROJECT: &str = r#"
default_target = "staging"

[[targets]]
name = "staging"
endpoint = "https://rpc.example/{API_KEY}"
credential_source = "SIGNER_KEY"
accounts = "single-credential"

[[targets]]
name = "production"
endpoint = "https://mainnet.example/{MAINNET_KEY}"
chain_id = 1
"#;

fn run(dir: &Path, args: &[&str], vars: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_deploy-profiles"))
        .current_dir(dir)
        .env_clear()
        .envs(vars.iter().copied())
        .arg("--no-env-file")
        .args(args)
        .output()
        .unwrap()
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("deploy-profiles.toml"), PROJECT).unwrap();
    dir
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_resolve_without_target_uses_default() {
    let dir = project();
    let output = run(dir.path(), &["resolve"], &[("API_KEY", "abc123")]);

    assert!(output.status.success());
    let profile = stdout_json(&output);
    assert_eq!(profile["target"], "staging");
    assert_eq!(profile["endpoint"], "https://rpc.example/abc123");
}

#[test]
fn test_resolve_unknown_target_fails() {
    let dir = project();
    let output = run(dir.path(), &["resolve", "goerli"], &[("API_KEY", "abc123")]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("goerli"));
}

#[test]
fn test_check_fails_when_a_target_does_not_resolve() {
    let dir = project();
    let output = run(dir.path(), &["check"], &[("API_KEY", "abc123")]);

    assert!(!output.status.success());
    let report = stdout_json(&output);
    assert!(report["staging"]["ok"].is_object());
    assert!(report["production"]["error"]
        .as_str()
        .unwrap()
        .contains("MAINNET_KEY"));

    let output = run(
        dir.path(),
        &["check"],
        &[("API_KEY", "abc123"), ("MAINNET_KEY", "m")],
    );
    assert!(output.status.success());
}

#[test]
fn test_resolve_all_reports_without_failing() {
    let dir = project();
    let output = run(dir.path(), &["resolve-all"], &[("API_KEY", "abc123")]);

    assert!(output.status.success());
    let report = stdout_json(&output);
    assert!(report["production"]["error"].is_string());
}

#[test]
fn test_toolchain_without_project_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["toolchain"], &[("ETHERS_SCAN_API_KEY", "scan-secret")]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("scan-secret"));
    assert_eq!(stdout_json(&output)["compiler_version"], "0.8.19");
}
