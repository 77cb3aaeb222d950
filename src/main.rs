use std::sync::Arc;

use clap::Parser;
use rsa_ciphertext::{AppState, Provider, app, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter())
        .init();

    let provider = Provider::new(env!("CARGO_PKG_VERSION"));
    if config.debug {
        tracing::debug!(
            resources = ?provider.resources.keys().collect::<Vec<_>>(),
            "provider registered in debug mode"
        );
    }

    let state = Arc::new(AppState::new(provider));

    // Create a TCP listener
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("RSA ciphertext provider listening on {}", config.addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
