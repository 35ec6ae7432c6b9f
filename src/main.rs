use agent_splitter::cli::Args;
use agent_splitter::generator::context::GeneratorContext;
use agent_splitter::server::{AppState, serve};
use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = args.into_config()?;

    let default_filter = if config.verbose {
        "info,agent_splitter=debug,tower_http=debug"
    } else {
        "info,agent_splitter=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.llm.api_key.trim().is_empty() {
        tracing::warn!(
            "No LLM API key configured. Set AGENT_SPLITTER_API_KEY or OPENAI_API_KEY, \
             or pass --llm-api-key; split requests will fail until one is provided."
        );
    }

    tracing::info!(
        provider = %config.llm.provider,
        model = %config.llm.model,
        target_language = %config.target_language,
        "Loaded configuration"
    );

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.bind_address()))?;

    let context = GeneratorContext::new(config)?;
    serve(Arc::new(AppState::new(context)), addr).await
}
