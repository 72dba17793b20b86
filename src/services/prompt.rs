// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prompt rendering for activity analysis.

use crate::models::Activity;

/// Render the coaching prompt for one activity.
///
/// Additional metrics are rendered as a compact JSON object (`{}` when empty).
pub fn build_activity_prompt(activity: &Activity) -> String {
    let metrics = serde_json::to_string(&activity.additional_metrics)
        .unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"Act as a professional fitness coach. Analyze the following activity:
Activity Type: {activity_type}
Duration: {duration} minutes
Calories Burned: {calories}
Additional Metrics: {metrics}

Based on this data, provide a detailed analysis including:
1. A general recommendation/summary.
2. Specific areas for improvement.
3. Suggestions for future workouts.
4. Safety advice relevant to this activity.

Output the result strictly as valid JSON in the following format:
{{
  "recommendation": "String",
  "improvements": [{{ "area": "String", "recommendation": "String" }}],
  "suggestions": [{{ "workout": "String", "description": "String" }}],
  "safety": ["String", "String"]
}}
"#,
        activity_type = activity.activity_type,
        duration = activity.duration,
        calories = activity.calories_burned,
    )
}
