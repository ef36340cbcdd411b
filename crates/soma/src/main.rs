// SPDX-FileCopyrightText: 2026 Soma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Soma - a subscription-gated practice menu bot for Telegram.
//!
//! This is the binary entry point for the Soma bot.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;

use clap::{Parser, Subcommand};
use soma_config::SomaConfig;
use soma_storage::SqliteUserStore;

/// Soma - a subscription-gated practice menu bot for Telegram.
#[derive(Parser, Debug)]
#[command(name = "soma", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the bot.
    Serve,
    /// Validate the configuration and the user store, then exit.
    Check,
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match soma_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            soma_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.bot.log_level);

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Check) => {
            if let Err(e) = run_check(&config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                eprintln!("error: failed to render config: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("soma: use --help for available commands");
        }
    }
}

/// `soma check`: the config already validated; open the store and make
/// sure migrations apply. Does not touch Telegram.
async fn run_check(config: &SomaConfig) -> Result<(), soma_core::SomaError> {
    println!("config: ok (bot.name={})", config.bot.name);

    let store = SqliteUserStore::new(config.storage.clone());
    store.initialize().await?;
    store.close().await?;
    println!("store: ok ({})", config.storage.database_path);

    if config.telegram.bot_token.is_none() {
        println!("telegram: no bot_token configured; `soma serve` will refuse to start");
    } else {
        println!("telegram: token present");
    }
    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("soma={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config =
            soma_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.bot.name, "soma");
    }
}
