// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation persistence (Firestore, or in-memory for local runs).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::Recommendation;

/// Collection names as constants.
pub mod collections {
    pub const RECOMMENDATIONS: &str = "recommendations";
}

/// Append-only recommendation persistence.
#[async_trait::async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Persist a new recommendation, returning it with its assigned ID.
    async fn save(&self, recommendation: Recommendation) -> Result<Recommendation, AppError>;
}
