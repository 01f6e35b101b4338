//! passboard - collection member aggregation CLI
//!
//! Walks a loyalty collection's asset index, enriches every asset with its
//! pass state and prints the leaderboard or member listing as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use passboard_agg::Aggregator;
use passboard_common::config::load_config;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

/// Log level used until the configuration file has been read
const DEFAULT_LOG_LEVEL: &str = "info";

/// Command-line arguments for passboard
#[derive(Parser, Debug)]
#[command(name = "passboard")]
#[command(about = "Loyalty collection leaderboard and member aggregation")]
#[command(version)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "PASSBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint answering getAssetsByGroup (overrides config)
    #[arg(long, env = "PASSBOARD_INDEX_ENDPOINT")]
    index_endpoint: Option<String>,

    /// Pass store base URL (overrides config)
    #[arg(long, env = "PASSBOARD_PASS_STORE_URL")]
    pass_store_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ranked leaderboard for a collection
    Leaderboard { collection: String },
    /// Per-member pass listings for a collection
    Members { collection: String },
    /// Pass state of a single asset
    Pass { asset: String },
    /// Loyalty program metadata
    Program { program: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing before config loading so its logs are not lost
    // (logs go to stderr, payloads to stdout)
    let env_filter = EnvFilter::try_from_default_env().ok();
    let level_from_env = env_filter.is_some();
    let (filter_layer, filter_handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL)));
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(endpoint) = args.index_endpoint {
        config.index_endpoint = endpoint;
    }
    if let Some(url) = args.pass_store_url {
        config.pass_store_url = url;
    }

    // RUST_LOG wins over the configured level
    if !level_from_env {
        apply_configured_level(&filter_handle, &config.logging.level)?;
    }

    info!("Index endpoint: {}", redact_query(&config.index_endpoint));
    info!("Pass store: {}", config.pass_store_url);

    let aggregator = Aggregator::from_config(&config).context("Failed to initialize aggregator")?;

    match args.command {
        Command::Leaderboard { collection } => {
            let leaderboard = aggregator
                .build_leaderboard(&collection)
                .await
                .context("Failed to fetch leaderboard")?;
            print_json(&leaderboard)
        }
        Command::Members { collection } => {
            let members = aggregator
                .build_members(&collection)
                .await
                .context("Failed to fetch members")?;
            print_json(&members)
        }
        Command::Pass { asset } => {
            let pass = aggregator
                .enricher()
                .fetch_pass(&asset)
                .await
                .with_context(|| format!("Error getting loyalty pass for address {}", asset))?;
            print_json(&pass)
        }
        Command::Program { program } => {
            let meta = aggregator
                .enricher()
                .fetch_program(&program)
                .await
                .with_context(|| format!("Error getting program for address {}", program))?;
            print_json(&meta)
        }
    }
}

/// Swap the active filter for the level named in the configuration
fn apply_configured_level(handle: &reload::Handle<EnvFilter, Registry>, level: &str) -> Result<()> {
    handle
        .reload(EnvFilter::new(level))
        .context("Failed to apply configured log level")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// RPC URLs often carry an API key in the query string
fn redact_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_replaces_startup_filter() {
        let (layer, handle) = reload::Layer::new(EnvFilter::new(DEFAULT_LOG_LEVEL));
        let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(layer));

        apply_configured_level(&handle, "debug").unwrap();

        let active = handle.with_current(|filter| filter.to_string()).unwrap();
        assert_eq!(active, "debug");
    }

    #[test]
    fn test_redact_query() {
        assert_eq!(
            redact_query("https://rpc.example.com/?api-key=secret"),
            "https://rpc.example.com/"
        );
        assert_eq!(redact_query("http://localhost:8899"), "http://localhost:8899");
    }
}
