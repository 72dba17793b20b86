// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use activity_advisor::error::AppError;
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[test]
fn test_is_ai_rate_limit_matches() {
    let err = AppError::AiGateway(AppError::AI_RATE_LIMIT.to_string());
    assert!(err.is_ai_rate_limit());
}

#[test]
fn test_is_ai_rate_limit_no_match() {
    let err = AppError::AiGateway("HTTP 500 Internal Server Error".to_string());
    assert!(!err.is_ai_rate_limit());

    let err = AppError::Database(AppError::AI_RATE_LIMIT.to_string());
    assert!(!err.is_ai_rate_limit());
}

#[test]
fn test_error_status_codes() {
    let cases = [
        (AppError::AiGateway("x".to_string()), StatusCode::BAD_GATEWAY),
        (
            AppError::Database("x".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (
            AppError::Internal(anyhow::anyhow!("x")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, status) in cases {
        assert_eq!(err.into_response().status(), status);
    }
}
