// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity event as published by the activity service.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A recorded exercise session waiting to be analyzed.
///
/// Received as the JSON body of a queue message and never modified here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Activity ID assigned by the activity service
    pub id: String,
    /// Owner of the activity
    pub user_id: String,
    /// Activity type tag (RUNNING, CYCLING, ...)
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Duration in minutes
    pub duration: u32,
    /// Calories burned
    pub calories_burned: u32,
    /// Start time (ISO 8601), if the producer sent one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// Free-form extra metrics (distance, average heart rate, ...)
    #[serde(default)]
    pub additional_metrics: BTreeMap<String, serde_json::Value>,
}
