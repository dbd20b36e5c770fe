//! eventkit-bridge - host calendar and reminder store for external applications
//!
//! Speaks line-delimited JSON: one request per line on stdin, one response
//! per line on stdout. Logs go to stderr.
//!
//! Configuration is read from ~/.config/eventkit-bridge/config.toml, an
//! optional `--config` file and `EVENTKIT_BRIDGE_*` variables.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use eventkit_core::memory::MemorySeed;
use eventkit_core::{HostApi, HostStore, MemoryStore, StoreAdapter};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::BridgeConfig;

#[derive(Parser)]
#[command(name = "eventkit-bridge")]
#[command(about = "Serve the host calendar and reminder store over stdin/stdout")]
struct Cli {
    /// Extra config file, layered over the global one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file to seed the store from (overrides `store_seed`)
    #[arg(long)]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = BridgeConfig::load(cli.config.as_deref())?;
    setup_logging(config.log_filter.as_deref());

    let zone = config.zone()?;
    let seed = match cli.seed.or_else(|| config.seed_path()) {
        Some(path) => {
            info!(path = %path.display(), "seeding store");
            config::load_seed(&path)?
        }
        None => MemorySeed::default(),
    };

    let store = MemoryStore::new(seed, zone);
    let capabilities = config.capabilities(store.capabilities());
    let api = HostApi::new(StoreAdapter::with_capabilities(store, capabilities), zone);

    info!(?zone, "eventkit-bridge ready");
    serve(&api).await
}

fn setup_logging(filter: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}

/// Answer requests until stdin closes.
async fn serve<S: HostStore>(api: &HostApi<S>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let response = api.handle_line(&line).await;

        stdout.write_all(response.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    debug!("stdin closed, shutting down");
    Ok(())
}
