use std::{env, sync::Arc};

use anyhow::Result;
use newsflow_backend::{routes, state::AppState};
use newsflow_shared::{memory_store::MemoryStore, sqlite_store::SqliteStore, store::ContentStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());

    tracing::info!("Starting NewsFlow backend server");

    // Pick the store: sqlite when DATABASE_URL is configured, in-memory otherwise
    let store: Arc<dyn ContentStore> = match env::var("DATABASE_URL") {
        Ok(url) => {
            tracing::info!("Using sqlite store at {}", url);
            Arc::new(SqliteStore::connect(&url).await?)
        },
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using the in-memory store");
            Arc::new(MemoryStore::new())
        },
    };

    // Build router
    let app = routes::create_router(AppState::new(store));

    // Start server
    let addr = format!("{}:{}", bind_addr, port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
