// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Recommendations live in the `recommendations` collection, one document
//! per analyzed activity event, keyed by a generated ID.

use crate::db::{collections, RecommendationStore};
use crate::error::AppError;
use crate::models::Recommendation;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Recommendation Operations ───────────────────────────────

    /// Get a recommendation by document ID.
    pub async fn get_recommendation(&self, id: &str) -> Result<Option<Recommendation>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::RECOMMENDATIONS)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new recommendation document under a fresh ID.
    pub async fn insert_recommendation(
        &self,
        recommendation: &Recommendation,
    ) -> Result<Recommendation, AppError> {
        let client = self.get_client()?;

        let id = uuid::Uuid::new_v4().to_string();
        let mut stored = recommendation.clone();
        stored.id = Some(id.clone());

        let _: Recommendation = client
            .fluent()
            .insert()
            .into(collections::RECOMMENDATIONS)
            .document_id(&id)
            .object(&stored)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(
            id = %id,
            activity_id = %stored.activity_id,
            "Recommendation stored"
        );

        Ok(stored)
    }
}

#[async_trait::async_trait]
impl RecommendationStore for FirestoreDb {
    async fn save(&self, recommendation: Recommendation) -> Result<Recommendation, AppError> {
        self.insert_recommendation(&recommendation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_save_is_database_error() {
        let db = FirestoreDb::new_mock();
        let rec = Recommendation {
            id: None,
            activity_id: "act-1".to_string(),
            user_id: "user-1".to_string(),
            activity_type: "RUNNING".to_string(),
            recommendation: "Overall:ok".to_string(),
            improvements: vec![],
            suggestions: vec![],
            safety: vec![],
            created_at: "2026-01-15T10:00:00Z".to_string(),
        };

        let err = db.save(rec).await.unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
    }
}
