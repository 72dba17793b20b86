// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cloud Tasks origin check.

use crate::config::ACTIVITY_QUEUE_NAME;
use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};

/// Header Cloud Tasks sets on every push delivery.
pub const QUEUE_NAME_HEADER: &str = "x-cloudtasks-queuename";

/// Require the activity queue header for `/tasks/*` routes.
///
/// Cloud Run strips this header from external requests, so its presence
/// guarantees the request came from our queue.
pub async fn require_queue_origin(request: Request, next: Next) -> Result<Response, StatusCode> {
    let queue_name_header = request.headers().get(QUEUE_NAME_HEADER);
    let is_valid_queue = queue_name_header
        .and_then(|h| h.to_str().ok())
        .is_some_and(|name| name == ACTIVITY_QUEUE_NAME);

    if !is_valid_queue {
        tracing::warn!(
            header = ?queue_name_header,
            "Blocked tasks request with invalid queue header"
        );
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(request).await)
}
