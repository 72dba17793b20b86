// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use activity_advisor::db::{FirestoreDb, MemoryStore, RecommendationStore};
use activity_advisor::error::AppError;
use activity_advisor::routes::create_router;
use activity_advisor::services::{ActivityProcessor, AiGateway, RecommendationGenerator};
use activity_advisor::AppState;
use serde_json::json;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Gateway that always answers with the same body (or error).
#[allow(dead_code)]
pub struct CannedGateway(pub Result<String, String>);

#[async_trait::async_trait]
impl AiGateway for CannedGateway {
    async fn get_answer(&self, _prompt: &str) -> Result<String, AppError> {
        self.0.clone().map_err(AppError::AiGateway)
    }
}

/// Wrap an inner analysis document in a Gemini response envelope.
#[allow(dead_code)]
pub fn gemini_envelope(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }],
        "modelVersion": "gemini-2.0-flash"
    })
    .to_string()
}

/// A valid activity event body.
#[allow(dead_code)]
pub fn activity_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "userId": "user-1",
        "type": "RUNNING",
        "duration": 30,
        "caloriesBurned": 300,
        "additionalMetrics": { "distance": 5.0 }
    })
}

/// Create a test app backed by the given gateway and store.
#[allow(dead_code)]
pub fn create_test_app_with(
    gateway: CannedGateway,
    store: Arc<dyn RecommendationStore>,
) -> (axum::Router, Arc<AppState>) {
    let processor = ActivityProcessor::new(RecommendationGenerator::new(Arc::new(gateway)), store);

    let state = Arc::new(AppState { processor });

    (create_router(state.clone()), state)
}

/// Create a test app with an in-memory store; returns the store for inspection.
#[allow(dead_code)]
pub fn create_test_app(gateway: CannedGateway) -> (axum::Router, MemoryStore) {
    let store = MemoryStore::new();
    let (app, _) = create_test_app_with(gateway, Arc::new(store.clone()));
    (app, store)
}
