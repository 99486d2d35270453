use anyhow::Context;

use taskhub_api::config;
use taskhub_api::server;
use taskhub_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting TaskHub API in {:?} mode", config.environment);

    let state = AppState::postgres()
        .await
        .context("failed to initialize storage")?;

    let app = server::app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("TaskHub API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;

    Ok(())
}
