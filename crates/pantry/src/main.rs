// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pantry - a conversational shopping-list and receipt assistant.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod check;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pantry_config::PantryConfig;

/// Pantry - shopping lists and receipts over Telegram.
#[derive(Parser, Debug)]
#[command(name = "pantry", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the assistant with Telegram long polling.
    Serve,
    /// Validate configuration and probe the configured collaborators.
    Check {
        /// Skip network probes; validate configuration only.
        #[arg(long)]
        offline: bool,
    },
}

fn load_config(path: Option<&std::path::Path>) -> Result<PantryConfig, Vec<pantry_config::ConfigError>> {
    match path {
        Some(path) => pantry_config::load_and_validate_path(path),
        None => pantry_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            pantry_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let outcome = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Check { offline }) => check::run_check(&config, offline).await,
        None => {
            println!("pantry: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_accepts_offline_flag() {
        let cli = Cli::try_parse_from(["pantry", "check", "--offline"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Check { offline: true })));
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["pantry", "serve", "--config", "/tmp/pantry.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/pantry.toml")));
        assert!(matches!(cli.command, Some(Commands::Serve)));
    }

    #[test]
    fn defaults_validate() {
        let config = pantry_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.agent.name, "pantry");
    }
}
