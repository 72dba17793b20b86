// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation generation: prompt, AI call, parse, assemble.
//!
//! [`RecommendationGenerator::generate`] never fails. Gateway errors and
//! structural parse errors both yield the fixed default recommendation.

use crate::models::{Activity, Recommendation};
use crate::services::analysis::{self, ParsedAnalysis};
use crate::services::gemini::AiGateway;
use crate::services::prompt::build_activity_prompt;
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub const DEFAULT_NARRATIVE: &str = "Unable to generate detailed analysis";
pub const DEFAULT_IMPROVEMENT: &str = "Continue with your current routine";
pub const DEFAULT_SUGGESTION: &str = "Consider consulting a fitness professional";
pub const DEFAULT_SAFETY: [&str; 3] = [
    "Always warm up before exercise",
    "Stay hydrated",
    "Listen to your body",
];

/// Which path produced a recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Built from the model's reply
    Analyzed,
    /// Fixed default substituted; carries the reason
    Defaulted(String),
}

/// Build a recommendation from parsed sections.
pub fn assemble(
    activity: &Activity,
    parsed: ParsedAnalysis,
    created_at: DateTime<Utc>,
) -> Recommendation {
    Recommendation {
        id: None,
        activity_id: activity.id.clone(),
        user_id: activity.user_id.clone(),
        activity_type: activity.activity_type.clone(),
        recommendation: parsed.narrative(),
        improvements: parsed.improvements,
        suggestions: parsed.suggestions,
        safety: parsed.safety,
        created_at: format_utc_rfc3339(created_at),
    }
}

/// The fixed fallback recommendation.
pub fn default_recommendation(activity: &Activity, created_at: DateTime<Utc>) -> Recommendation {
    Recommendation {
        id: None,
        activity_id: activity.id.clone(),
        user_id: activity.user_id.clone(),
        activity_type: activity.activity_type.clone(),
        recommendation: DEFAULT_NARRATIVE.to_string(),
        improvements: vec![DEFAULT_IMPROVEMENT.to_string()],
        suggestions: vec![DEFAULT_SUGGESTION.to_string()],
        safety: DEFAULT_SAFETY.iter().map(|s| s.to_string()).collect(),
        created_at: format_utc_rfc3339(created_at),
    }
}

/// Turn a raw AI reply into a recommendation, falling back to the default.
pub fn recommendation_from_response(
    activity: &Activity,
    raw: &str,
    created_at: DateTime<Utc>,
) -> (Recommendation, AnalysisOutcome) {
    match analysis::parse_response(raw) {
        Ok(parsed) => (assemble(activity, parsed, created_at), AnalysisOutcome::Analyzed),
        Err(e) => {
            tracing::warn!(activity_id = %activity.id, error = %e, "Failed to parse AI response");
            (
                default_recommendation(activity, created_at),
                AnalysisOutcome::Defaulted(e.to_string()),
            )
        }
    }
}

/// Drives prompt -> AI -> parse -> assemble for one activity.
#[derive(Clone)]
pub struct RecommendationGenerator {
    gateway: Arc<dyn AiGateway>,
}

impl RecommendationGenerator {
    pub fn new(gateway: Arc<dyn AiGateway>) -> Self {
        Self { gateway }
    }

    /// Generate a recommendation for an activity. Always returns one.
    pub async fn generate(&self, activity: &Activity) -> (Recommendation, AnalysisOutcome) {
        let prompt = build_activity_prompt(activity);
        tracing::debug!(activity_id = %activity.id, "Prompt built");

        let raw = match self.gateway.get_answer(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    activity_id = %activity.id,
                    rate_limited = e.is_ai_rate_limit(),
                    error = %e,
                    "AI gateway call failed, using default recommendation"
                );
                return (
                    default_recommendation(activity, Utc::now()),
                    AnalysisOutcome::Defaulted(e.to_string()),
                );
            }
        };
        tracing::debug!(activity_id = %activity.id, response = %raw, "Response from AI");

        recommendation_from_response(activity, &raw, Utc::now())
    }
}
