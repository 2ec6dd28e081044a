// crates/huddle-cli/src/main.rs
//
// CLI entrypoint for Huddle group consensus.
//
// Loads configuration, initializes tracing, and dispatches to the
// `consensus` and `categories` subcommands. Exit status is 0 on success,
// 2 when the request itself was invalid (bad or unknown group id), and 1
// for every other failure.

mod commands;
mod config;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use commands::consensus::ConsensusCmd;
use config::HuddleConfig;
use output::OutputFormat;

/// Huddle: pick where a group eats from its members' cuisine preferences.
#[derive(Parser, Debug)]
#[command(
    name = "huddle",
    version = "0.1.0",
    about = "Group cuisine consensus: leader, top preferences, and opinion weights"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "~/.huddle/config.toml")]
    config: String,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the consensus for one group.
    Consensus(ConsensusCmd),

    /// List cuisine categories with their keys and labels.
    Categories,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration from TOML file, falling back to defaults if the file
    // is missing or invalid.
    let (config, load_error) = match HuddleConfig::load(&cli.config) {
        Ok(cfg) => (cfg, None),
        Err(e) => (HuddleConfig::default(), Some(e.to_string())),
    };

    // Initialize tracing subscriber for structured logging. RUST_LOG wins
    // over the configured level. Logs go to stderr so stdout stays parseable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    match load_error {
        None => tracing::debug!("Loaded configuration from {}", cli.config),
        Some(e) if config::expand_tilde(&cli.config).exists() => tracing::warn!(
            "Could not load config from {}: {}. Using defaults.",
            cli.config,
            e
        ),
        Some(_) => tracing::debug!("No config at {}. Using defaults.", cli.config),
    }

    let result = match &cli.command {
        Commands::Consensus(cmd) => commands::consensus::run(cmd, &config, cli.format).await,
        Commands::Categories => commands::categories::run(cli.format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            if e.is_client_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
