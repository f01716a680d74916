use anyhow::Context;
use tracing::info;

use budget_ok::{
    bankok::BankOkClient,
    config::Config,
    create_router,
    storage::{MemoryEnvelopeStore, SqliteEnvelopeStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;
    let bank = BankOkClient::new(&config.bank_ok_url);
    info!("Bank OK endpoint: {}", config.bank_ok_url);

    let router = match config.database_url.as_deref() {
        Some(url) => {
            info!("Opening SQLite store at {}", url);
            let store = SqliteEnvelopeStore::connect(url).await?;
            create_router(AppState::new(store, bank))
        }
        None => {
            info!("DATABASE_URL not set, envelopes are kept in memory");
            create_router(AppState::new(MemoryEnvelopeStore::new(), bank))
        }
    };

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    info!("Budget OK listening on http://{}", config.addr);
    axum::serve(listener, router).await.context("server error")?;

    Ok(())
}
