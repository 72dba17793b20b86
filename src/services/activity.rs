// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity processing service.
//!
//! Handles one queued activity event:
//! 1. Build the analysis prompt
//! 2. Ask Gemini for an analysis
//! 3. Parse the reply (or substitute the default recommendation)
//! 4. Store the recommendation
//!
//! Only a storage failure is returned as an error; the queue redelivers the
//! message in that case.

use crate::db::RecommendationStore;
use crate::error::Result;
use crate::models::{Activity, Recommendation};
use crate::services::recommendation::{AnalysisOutcome, RecommendationGenerator};
use std::sync::Arc;

/// Turns queued activities into stored recommendations.
#[derive(Clone)]
pub struct ActivityProcessor {
    generator: RecommendationGenerator,
    store: Arc<dyn RecommendationStore>,
}

impl ActivityProcessor {
    pub fn new(generator: RecommendationGenerator, store: Arc<dyn RecommendationStore>) -> Self {
        Self { generator, store }
    }

    /// Analyze an activity and persist the resulting recommendation.
    pub async fn process_activity(&self, activity: &Activity) -> Result<ProcessResult> {
        tracing::info!(
            activity_id = %activity.id,
            user_id = %activity.user_id,
            activity_type = %activity.activity_type,
            "Received activity for processing"
        );

        let (recommendation, outcome) = self.generator.generate(activity).await;

        match &outcome {
            AnalysisOutcome::Analyzed => {
                tracing::info!(activity_id = %activity.id, "Activity analyzed");
            }
            AnalysisOutcome::Defaulted(reason) => {
                tracing::warn!(
                    activity_id = %activity.id,
                    reason = %reason,
                    "Using default recommendation"
                );
            }
        }

        let stored = self.store.save(recommendation).await.map_err(|e| {
            tracing::error!(activity_id = %activity.id, error = %e, "Failed to store recommendation");
            e
        })?;

        tracing::info!(
            activity_id = %activity.id,
            recommendation_id = ?stored.id,
            "Recommendation persisted"
        );

        Ok(ProcessResult {
            recommendation: stored,
            outcome,
        })
    }
}

/// Result of processing an activity.
#[derive(Debug)]
pub struct ProcessResult {
    pub recommendation: Recommendation,
    pub outcome: AnalysisOutcome,
}

impl ProcessResult {
    /// True if the fixed default was stored instead of a model analysis.
    pub fn is_default(&self) -> bool {
        matches!(self.outcome, AnalysisOutcome::Defaulted(_))
    }
}
