// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity Advisor worker
//!
//! Receives activity events pushed by Cloud Tasks, analyzes them with
//! Gemini and stores one recommendation per activity.

use activity_advisor::{
    config::{Config, StoreBackend},
    db::{FirestoreDb, MemoryStore, RecommendationStore},
    services::{ActivityProcessor, GeminiClient, RecommendationGenerator},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Activity Advisor");

    // Initialize recommendation store
    let store: Arc<dyn RecommendationStore> = match config.store_backend {
        StoreBackend::Firestore => Arc::new(FirestoreDb::new(&config.gcp_project_id).await?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory recommendation store (data is not persisted)");
            Arc::new(MemoryStore::new())
        }
    };

    // Initialize Gemini client
    let gemini = GeminiClient::new(&config)?;
    tracing::info!(
        model = %config.gemini_model,
        timeout_secs = config.gemini_timeout_secs,
        "Gemini client initialized"
    );

    let processor = ActivityProcessor::new(RecommendationGenerator::new(Arc::new(gemini)), store);

    // Build shared state
    let state = Arc::new(AppState { processor });

    // Build router
    let app = activity_advisor::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("activity_advisor=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
