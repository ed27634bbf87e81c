use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tldrfeed::{FeedRepository, InMemoryRepository};
use tldrfeed_server::adapters::MongoRepository;
use tldrfeed_server::config::{Backend, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tldrfeed=info,tldrfeed_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::parse();

    tracing::info!("📰 tldrfeed API initializing...");

    tldrfeed_server::server::run(
        config.bind_addr(),
        config.indent_json,
        || open_repository(&config),
        shutdown_signal(),
    )
    .await
}

async fn open_repository(config: &ServerConfig) -> Result<Arc<dyn FeedRepository>> {
    match config.backend {
        Backend::Mongo => {
            let repo = MongoRepository::connect(&config.mongo())
                .await
                .with_context(|| format!("Failed to connect to DB @ '{}'", config.db))?;
            Ok(Arc::new(repo))
        }
        Backend::Memory => {
            tracing::warn!("⚠️  Using in-memory storage - data is lost on exit");
            Ok(Arc::new(InMemoryRepository::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
