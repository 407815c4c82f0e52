// Bank Accounts - Web Server
// REST API with Axum over the configured account store

use anyhow::{Context, Result};
use bank_accounts::{http, logging, AccountService, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init(false);

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::from_env()?,
    };

    let service = AccountService::new(config.store.open_store()?);
    let app = http::router(service);

    let addr = &config.server.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("🚀 Server running on http://{}", addr);
    tracing::info!("   API: http://{}/bank-accounts", addr);

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
