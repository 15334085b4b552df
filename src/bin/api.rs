use financial_query_responder::{api::start_server, config::AppConfig, DataStore, QueryResponder};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    info!("🚀 Financial Query Responder - API Server");
    info!("📍 Address: {}", config.bind_addr());
    info!("📂 Data: {}", config.data_path.display());

    let store = DataStore::load_or_unavailable(&config.data_path);
    if !store.is_available() {
        warn!("⚠️  Serving without data; every query will report it unavailable");
    }

    let responder = QueryResponder::new(Arc::new(store));

    info!("📡 Starting API server...");
    start_server(responder, config.bind_addr()).await?;

    Ok(())
}
