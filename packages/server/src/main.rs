use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use pdfchat_server::config::AppConfig;
use pdfchat_server::database::init_db;
use pdfchat_server::llm::GeminiClient;
use pdfchat_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; variables may come from the environment.
    let _ = dotenvy::dotenv();

    let config = AppConfig::load().context("Failed to load configuration")?;
    tracing_subscriber::fmt()
        .with_max_level(config.logging.max_level())
        .init();

    let db = init_db(&config.database)
        .await
        .context("Failed to initialize database")?;
    let model = GeminiClient::new(&config.model).context("Failed to build model client")?;
    info!(model = %config.model.model_name, "Model client configured");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    let state = AppState::new(config, db, Arc::new(model))
        .await
        .context("Failed to prepare upload directory")?;
    let app = pdfchat_server::build_router(state);

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
