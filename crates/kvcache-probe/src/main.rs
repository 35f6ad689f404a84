//! Cache Probe CLI
//!
//! Exercises the cache client against a configured server: one-shot
//! operations plus a hold mode that keeps the connection open until the
//! process is interrupted.

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kvcache_client::{CacheClient, CacheConfig, shutdown_signal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kvcache-probe")]
#[command(about = "Probe a key-value cache server")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check server liveness
    Ping,
    /// Store a value under a key
    Set {
        key: String,
        value: String,
        /// Expiration in seconds (0 = no expiration)
        #[arg(long, default_value_t = 0)]
        ttl: u64,
    },
    /// Fetch the value stored under a key
    Get { key: String },
    /// Delete a key
    Del { key: String },
    /// Ping, then hold the connection open until interrupted
    Hold,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("kvcache_client=info".parse()?)
                .add_directive("kvcache_probe=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = CacheConfig::from_env();

    info!(addr = %config.addr, db = config.db, "connecting to cache server");
    let client = CacheClient::new(&config)?;

    let outcome = run(&client, args.command).await;

    // Release the connection on every exit path; there is no caller to
    // return a close failure to, so log it instead.
    if let Err(e) = client.close().await {
        error!(error = %e, "failed to close cache connection");
    }

    outcome
}

async fn run(client: &CacheClient, command: Command) -> Result<()> {
    match command {
        Command::Ping => {
            let pong = client.ping().await?;
            info!(response = %pong, "server is alive");
        }
        Command::Set { key, value, ttl } => {
            client.set(&key, &value, Duration::from_secs(ttl)).await?;
            info!(%key, ttl_secs = ttl, "value stored");
        }
        Command::Get { key } => {
            let value = client.get(&key).await?;
            info!(%key, %value, "value fetched");
        }
        Command::Del { key } => {
            let removed = client.invalidate(&key).await?;
            info!(%key, removed, "key invalidated");
        }
        Command::Hold => {
            client.ping().await?;
            info!("holding cache connection open, Ctrl+C to exit");
            shutdown_signal().await;
        }
    }

    Ok(())
}
