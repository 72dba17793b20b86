// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Task handler routes for Cloud Tasks callbacks.
//!
//! These endpoints are called by Cloud Tasks, not directly by users.
//! The response status is the acknowledgement: 2xx removes the task from
//! the queue, anything else makes Cloud Tasks redeliver it.

use crate::config::ANALYZE_ACTIVITY_PATH;
use crate::error::Result;
use crate::middleware::require_queue_origin;
use crate::models::Activity;
use crate::AppState;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    middleware,
    routing::post,
    Router,
};
use std::sync::Arc;

/// Task handler routes (called by Cloud Tasks).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(ANALYZE_ACTIVITY_PATH, post(analyze_activity))
        .route_layer(middleware::from_fn(require_queue_origin))
}

/// Analyze a single activity (called by Cloud Tasks).
///
/// A store failure comes back as a 5xx so Cloud Tasks retries the task.
async fn analyze_activity(
    State(state): State<Arc<AppState>>,
    Json(activity): Json<Activity>,
) -> Result<StatusCode> {
    let result = state
        .processor
        .process_activity(&activity)
        .await
        .inspect_err(|e| {
            tracing::error!(
                activity_id = %activity.id,
                error = %e,
                "Failed to process activity"
            );
        })?;

    tracing::info!(
        activity_id = %activity.id,
        recommendation_id = ?result.recommendation.id,
        defaulted = result.is_default(),
        "Activity processed successfully"
    );
    Ok(StatusCode::OK)
}
