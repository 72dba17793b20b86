// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gemini API client for activity analysis.
//!
//! The client returns the provider's raw JSON envelope untouched; turning it
//! into a recommendation is the job of [`crate::services::analysis`].

use crate::config::Config;
use crate::error::AppError;
use serde::Serialize;
use std::time::Duration;

/// Sends a prompt to a generative model and returns the raw reply.
#[async_trait::async_trait]
pub trait AiGateway: Send + Sync {
    /// Returns the provider's raw response body.
    async fn get_answer(&self, prompt: &str) -> Result<String, AppError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client for the configured model.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.gemini_timeout_secs))
            .build()
            .map_err(|e| AppError::AiGateway(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/{}:generateContent",
                config.gemini_api_url, config.gemini_model
            ),
            api_key: config.gemini_api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl AiGateway for GeminiClient {
    async fn get_answer(&self, prompt: &str) -> Result<String, AppError> {
        let request = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::AiGateway(format!("Gemini request timed out: {}", e))
                } else {
                    AppError::AiGateway(format!("Gemini request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::AiGateway(format!("Failed to read Gemini response: {}", e)))?;

        if status.as_u16() == 429 {
            tracing::warn!("Gemini rate limit hit (429)");
            return Err(AppError::AiGateway(AppError::AI_RATE_LIMIT.to_string()));
        }

        if !status.is_success() {
            return Err(AppError::AiGateway(format!("HTTP {}: {}", status, body)));
        }

        tracing::debug!(bytes = body.len(), "Received Gemini response");
        Ok(body)
    }
}
