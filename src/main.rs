//! deploy-profiles CLI.
//!
//! Resolves deployment targets against the current environment and prints
//! the result as JSON for the deployment engine and toolchain services.
//!
//! # Architecture Overview
//!
//! ```text
//!   deploy-profiles.toml ──→ config::loader ──→ ProjectConfig
//!                                                   │
//!   process env + .env ──→ EnvironmentBindings ─────┤
//!                                                   ▼
//!                                            resolver::Resolver
//!                                             │             │
//!                                   ResolvedProfile   ToolchainSettings
//!                                             │             │
//!                                             └──── stdout (JSON)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use deploy_profiles::config::{load_or_default, TargetSet};
use deploy_profiles::observability::logging::{init_logging, DEFAULT_LEVEL};
use deploy_profiles::resolver::{resolve_toolchain_settings, Resolver};
use deploy_profiles::EnvironmentBindings;

#[derive(Parser)]
#[command(name = "deploy-profiles")]
#[command(about = "Resolve deployment target profiles from the environment", long_about = None)]
struct Cli {
    /// Project file (defaults to ./deploy-profiles.toml, then built-in targets)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dotenv file merged under the process environment
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Ignore the dotenv file
    #[arg(long)]
    no_env_file: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = DEFAULT_LEVEL)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured targets
    Targets,
    /// Resolve one target (the default target when omitted)
    Resolve {
        target: Option<String>,
    },
    /// Resolve every target and report each outcome
    ResolveAll,
    /// Show compiler and service settings
    Toolchain,
    /// Resolve every target and fail if any does not resolve
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let config = load_or_default(cli.config.as_deref(), &cwd)?;
    let dotenv = (!cli.no_env_file).then_some(cli.env_file.as_path());
    let env = EnvironmentBindings::capture(dotenv)?;
    let resolver = Resolver::for_project(&config, &env);

    match &cli.command {
        Commands::Targets => {
            let targets: Vec<Value> = config
                .targets
                .iter()
                .map(|t| {
                    json!({
                        "name": t.name,
                        "default": t.name == config.default_target,
                        "chain_id": t.chain_id,
                        "accounts": t.accounts,
                    })
                })
                .collect();
            print_json(&targets)?;
        }
        Commands::Resolve { target } => {
            let profile = resolver.resolve_selected(&config, target.as_deref())?;
            print_json(&profile)?;
        }
        Commands::ResolveAll | Commands::Check => {
            let targets = TargetSet::from_project(&config).map_err(|errors| {
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            })?;
            let results = resolver.resolve_all(&targets);
            let failed = results.values().filter(|r| r.is_err()).count();

            let report: serde_json::Map<String, Value> = results
                .into_iter()
                .map(|(name, result)| {
                    let entry = match result {
                        Ok(profile) => json!({ "ok": profile }),
                        Err(e) => json!({ "error": e.to_string() }),
                    };
                    (name, entry)
                })
                .collect();
            print_json(&report)?;

            if matches!(&cli.command, Commands::Check) && failed > 0 {
                eprintln!("{} of {} targets failed to resolve", failed, targets.len());
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Toolchain => {
            print_json(&resolve_toolchain_settings(&config, &env))?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
