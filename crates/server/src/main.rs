use anyhow::Result;
use brave_api::{BraveApi, RateLimiter, SearchApi};
use brave_mcp::tools::default_registry;
use brave_mcp::transport::{http, stdio};
use brave_mcp::{McpServer, SessionManager};
use clap::Parser;
use std::sync::Arc;

mod config;

use config::{Args, Transport};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Logs go to stderr so the stdio transport keeps stdout clean; an
    // explicit --log-level wins over RUST_LOG
    let filter = match args.log_level.as_deref() {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info".into()),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(error) = run(args).await {
        tracing::error!("fatal: {error:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let api_key = args.api_key()?;

    let api: Arc<dyn SearchApi> = Arc::new(BraveApi::new(api_key, RateLimiter::default())?);
    let registry = Arc::new(default_registry(api)?);

    match args.transport {
        Transport::Stdio => {
            tracing::info!("starting on stdio");
            stdio::serve(McpServer::new(registry)).await?;
        }
        Transport::Http => {
            let addr = args.bind_addr();
            tracing::info!("starting on http ({addr})");
            http::serve(&addr, Arc::new(SessionManager::new(registry))).await?;
        }
    }

    Ok(())
}
