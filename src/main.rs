//! Spelling Bee - voice assistant skill backend
//!
//! Receives intent events from the voice platform, runs the spelling game,
//! and answers with speech.

mod api;
mod config;
mod db;
mod dictionary;
mod runtime;
mod skill;

use api::{create_router, AppState};
use config::SkillConfig;
use db::Database;
use dictionary::{LoggingDictionary, MerriamWebsterClient};
use runtime::{DatabaseStore, SkillRuntime};
use skill::{Dispatcher, OsRandom, SkillServices};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spelling_bee=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = SkillConfig::from_env()?;
    tracing::info!(config = ?config, "Configuration loaded");

    // Ensure database directory exists
    if let Some(parent) = PathBuf::from(&config.db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Initialize database
    tracing::info!(path = %config.db_path, "Opening database");
    let db = Database::open(&config.db_path)?;

    // Dictionary client
    let dictionary = MerriamWebsterClient::new(
        config.dictionary_api_key.clone(),
        config.dictionary_endpoint.as_deref(),
    );
    let dictionary = Arc::new(LoggingDictionary::new(Arc::new(dictionary)));

    let services = SkillServices::new(dictionary, Arc::new(OsRandom), config.words.clone());
    let dispatcher = Dispatcher::standard();
    tracing::info!(handlers = ?dispatcher.handler_names(), "Dispatcher ready");

    let runtime = SkillRuntime::new(DatabaseStore::new(db), dispatcher, services);
    let state = AppState::new(runtime);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Spelling Bee skill listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
