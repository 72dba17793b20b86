// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process recommendation store for local runs and tests.

use crate::db::RecommendationStore;
use crate::error::AppError;
use crate::models::Recommendation;
use dashmap::DashMap;
use std::sync::Arc;

/// Recommendation store backed by a concurrent map.
///
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    recommendations: Arc<DashMap<String, Recommendation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<Recommendation> {
        self.recommendations.get(id).map(|r| r.value().clone())
    }

    /// All recommendations stored for an activity (redeliveries may add more than one).
    pub fn for_activity(&self, activity_id: &str) -> Vec<Recommendation> {
        self.recommendations
            .iter()
            .filter(|r| r.activity_id == activity_id)
            .map(|r| r.value().clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl RecommendationStore for MemoryStore {
    async fn save(&self, mut recommendation: Recommendation) -> Result<Recommendation, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        recommendation.id = Some(id.clone());
        self.recommendations.insert(id, recommendation.clone());
        Ok(recommendation)
    }
}
