// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Recommendation record produced for each analyzed activity.

use serde::{Deserialize, Serialize};

/// Stored recommendation in Firestore.
///
/// Written once per activity and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Document ID, assigned by the store on save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Source activity ID
    pub activity_id: String,
    /// Owner of the source activity
    pub user_id: String,
    /// Activity type tag copied from the activity
    pub activity_type: String,
    /// Consolidated narrative (Overall / Pace / Heart Rate / Calories)
    pub recommendation: String,
    /// "area: recommendation" entries
    pub improvements: Vec<String>,
    /// "workout: description" entries
    pub suggestions: Vec<String>,
    /// Safety advice
    pub safety: Vec<String>,
    /// When the recommendation was assembled (RFC 3339)
    pub created_at: String,
}
