mod config;
mod exchange;
mod http;
mod indexer;
mod processor;
mod repository;
mod triplestore;

use std::path::PathBuf;

use anyhow::Result;
use tokio::signal::unix::{SignalKind, signal};
use tracing::{info, warn};

use crate::config::Config;
use crate::indexer::Indexer;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let flags = xflags::parse_or_exit! {
        /// Path to the TOML configuration file
        optional -c,--config CONFIG: PathBuf
        /// Log updates instead of sending them to the triplestore
        optional --dry-run
    };

    let config = Config::load(flags.config.as_deref())?;
    info!(
        repository = %config.repository.base_url,
        update_url = %config.triplestore.update_url,
        dry_run = flags.dry_run,
        "starting indexer"
    );
    let http_port = config.server.http_port;
    let indexer = Indexer::new(config, flags.dry_run)?;

    http::serve(indexer, http_port, shutdown_signal()).await
}

async fn shutdown_signal() {
    let (mut sigterm, mut sigint) = match (
        signal(SignalKind::terminate()),
        signal(SignalKind::interrupt()),
    ) {
        (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
        (Err(error), _) | (_, Err(error)) => {
            warn!(%error, "unable to install signal handlers");
            return std::future::pending().await;
        }
    };
    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received the terminate signal; stopping");
        }
        _ = sigint.recv() => {
            info!("Received the interrupt signal; stopping");
        }
    }
}
