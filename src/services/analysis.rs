// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tolerant parsing of Gemini analysis replies.
//!
//! A reply is parsed in two independent stages:
//! 1. The provider envelope (`candidates[0].content.parts[0].text`)
//! 2. The fenced JSON document inside that text
//!
//! Either stage failing is an [`AnalysisError`]; the caller substitutes the
//! default recommendation. Inside a well-formed document every field is
//! optional and missing lists fall back to a placeholder.

use serde_json::Value;

/// Label prefixes for the narrative sections, in output order.
const NARRATIVE_LABELS: [&str; 4] = ["Overall:", "Pace:", "Heart Rate:", "Calories:"];

pub const NO_IMPROVEMENTS: &str = "No specific improvements provided";
pub const NO_SUGGESTIONS: &str = "No specific suggestions provided";
pub const NO_SAFETY: &str = "Follow general safety guidelines";

/// Structural failure while parsing a reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid response envelope: {0}")]
    Envelope(String),

    #[error("Invalid analysis document: {0}")]
    Inner(String),
}

/// Structured sections extracted from one reply.
///
/// List fields are never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAnalysis {
    pub overall: Option<String>,
    pub pace: Option<String>,
    pub heart_rate: Option<String>,
    pub calories_burned: Option<String>,
    pub improvements: Vec<String>,
    pub suggestions: Vec<String>,
    pub safety: Vec<String>,
}

impl ParsedAnalysis {
    /// Consolidated narrative: each present section as `{label}{text}`,
    /// separated by blank lines, trimmed.
    pub fn narrative(&self) -> String {
        let sections = [
            &self.overall,
            &self.pace,
            &self.heart_rate,
            &self.calories_burned,
        ];

        let mut out = String::new();
        for (label, text) in NARRATIVE_LABELS.into_iter().zip(sections) {
            if let Some(text) = text {
                out.push_str(label);
                out.push_str(text);
                out.push_str("\n\n");
            }
        }
        out.trim().to_string()
    }
}

/// Parse a raw Gemini reply into structured sections.
pub fn parse_response(raw: &str) -> Result<ParsedAnalysis, AnalysisError> {
    let text = extract_envelope_text(raw)?;
    let document = strip_code_fence(&text);
    tracing::debug!(document, "Parsed AI response text");
    parse_analysis_document(document)
}

/// Stage 1: pull the first candidate's first text part out of the envelope.
pub fn extract_envelope_text(raw: &str) -> Result<String, AnalysisError> {
    let root: Value =
        serde_json::from_str(raw).map_err(|e| AnalysisError::Envelope(e.to_string()))?;

    root.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            AnalysisError::Envelope("missing candidates[0].content.parts[0].text".to_string())
        })
}

/// Strip a leading ```json (or bare ```) fence and a trailing ``` fence.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

/// Stage 2: parse the inner analysis document.
pub fn parse_analysis_document(document: &str) -> Result<ParsedAnalysis, AnalysisError> {
    let doc: Value =
        serde_json::from_str(document).map_err(|e| AnalysisError::Inner(e.to_string()))?;

    let analysis = doc.get("analysis");
    let section = |key: &str| analysis.and_then(|a| a.get(key)).map(node_text);

    Ok(ParsedAnalysis {
        overall: section("overall"),
        pace: section("pace"),
        heart_rate: section("heartRate"),
        calories_burned: section("caloriesBurned"),
        improvements: or_placeholder(
            extract_pairs(doc.get("improvements"), "area", "recommendation"),
            NO_IMPROVEMENTS,
        ),
        suggestions: or_placeholder(
            extract_pairs(doc.get("suggestions"), "workout", "description"),
            NO_SUGGESTIONS,
        ),
        safety: or_placeholder(extract_strings(doc.get("safety")), NO_SAFETY),
    })
}

/// Render `{first}: {second}` for each array element; absent keys render empty.
fn extract_pairs(node: Option<&Value>, first: &str, second: &str) -> Vec<String> {
    node.and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    let a = item.get(first).map(node_text).unwrap_or_default();
                    let b = item.get(second).map(node_text).unwrap_or_default();
                    format!("{a}: {b}")
                })
                .collect()
        })
        .unwrap_or_default()
}

fn extract_strings(node: Option<&Value>) -> Vec<String> {
    node.and_then(Value::as_array)
        .map(|items| items.iter().map(node_text).collect())
        .unwrap_or_default()
}

fn or_placeholder(items: Vec<String>, placeholder: &str) -> Vec<String> {
    if items.is_empty() {
        vec![placeholder.to_string()]
    } else {
        items
    }
}

/// Text of a node: scalars (including null) render as their JSON text,
/// containers as empty text.
fn node_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Wrap an inner document the way Gemini does.
    fn envelope(text: &str) -> String {
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }], "role": "model" },
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    #[test]
    fn test_full_response() {
        let inner = json!({
            "analysis": {
                "overall": "Solid run",
                "pace": "Consistent",
                "heartRate": "Zone 3",
                "caloriesBurned": "On target"
            },
            "improvements": [{ "area": "Cadence", "recommendation": "Aim for 170 spm" }],
            "suggestions": [{ "workout": "Intervals", "description": "6x400m" }],
            "safety": ["Hydrate", "Stretch"]
        });
        let raw = envelope(&format!("```json\n{inner}\n```"));

        let parsed = parse_response(&raw).unwrap();

        assert_eq!(
            parsed.narrative(),
            "Overall:Solid run\n\nPace:Consistent\n\nHeart Rate:Zone 3\n\nCalories:On target"
        );
        assert_eq!(parsed.improvements, vec!["Cadence: Aim for 170 spm"]);
        assert_eq!(parsed.suggestions, vec!["Intervals: 6x400m"]);
        assert_eq!(parsed.safety, vec!["Hydrate", "Stretch"]);
    }

    #[test]
    fn test_only_overall_section() {
        let raw = envelope(r#"```json
{"analysis": {"overall": "Good pace"}}
```"#);

        let parsed = parse_response(&raw).unwrap();

        assert_eq!(parsed.narrative(), "Overall:Good pace");
        assert!(parsed.pace.is_none());
        assert!(parsed.heart_rate.is_none());
        assert!(parsed.calories_burned.is_none());
    }

    #[test]
    fn test_empty_lists_get_placeholders() {
        let raw = envelope(r#"{"analysis": {}, "improvements": [], "suggestions": [], "safety": []}"#);

        let parsed = parse_response(&raw).unwrap();

        assert_eq!(parsed.improvements, vec![NO_IMPROVEMENTS]);
        assert_eq!(parsed.suggestions, vec![NO_SUGGESTIONS]);
        assert_eq!(parsed.safety, vec![NO_SAFETY]);
        assert_eq!(parsed.narrative(), "");
    }

    #[test]
    fn test_missing_and_non_array_lists_get_placeholders() {
        let raw = envelope(r#"{"improvements": "run more", "safety": {"tip": "x"}}"#);

        let parsed = parse_response(&raw).unwrap();

        assert_eq!(parsed.improvements, vec![NO_IMPROVEMENTS]);
        assert_eq!(parsed.suggestions, vec![NO_SUGGESTIONS]);
        assert_eq!(parsed.safety, vec![NO_SAFETY]);
    }

    #[test]
    fn test_missing_pair_fields_render_empty() {
        let raw = envelope(
            r#"{"improvements": [{"area": "Form"}, {"recommendation": "Slow down"}],
                "suggestions": [{"description": "Easy 5k"}]}"#,
        );

        let parsed = parse_response(&raw).unwrap();

        assert_eq!(parsed.improvements, vec!["Form: ", ": Slow down"]);
        assert_eq!(parsed.suggestions, vec![": Easy 5k"]);
    }

    #[test]
    fn test_string_list_entries_render_as_empty_pairs() {
        // The model sometimes answers with plain strings instead of objects.
        let raw = envelope(r#"{"improvements": ["Run more"]}"#);

        let parsed = parse_response(&raw).unwrap();

        assert_eq!(parsed.improvements, vec![": "]);
    }

    #[test]
    fn test_non_string_sections_use_json_text() {
        let raw = envelope(r#"{"analysis": {"overall": "Fine", "heartRate": 152, "pace": null}}"#);

        let parsed = parse_response(&raw).unwrap();

        assert_eq!(parsed.heart_rate.as_deref(), Some("152"));
        assert_eq!(parsed.pace.as_deref(), Some("null"));
        assert_eq!(parsed.narrative(), "Overall:Fine\n\nPace:null\n\nHeart Rate:152");
    }

    #[test]
    fn test_null_overall_renders_as_null_text() {
        let raw = envelope(r#"{"analysis": {"overall": null}}"#);

        let parsed = parse_response(&raw).unwrap();

        assert_eq!(parsed.narrative(), "Overall:null");
    }

    #[test]
    fn test_top_level_recommendation_is_not_narrative() {
        let raw = envelope(r#"{"recommendation": "Keep going"}"#);

        let parsed = parse_response(&raw).unwrap();

        assert!(parsed.overall.is_none());
        assert_eq!(parsed.narrative(), "");
    }

    #[test]
    fn test_invalid_envelope_json() {
        let err = parse_response("not json at all").unwrap_err();
        assert!(matches!(err, AnalysisError::Envelope(_)));
    }

    #[test]
    fn test_envelope_without_candidates() {
        let err = parse_response(r#"{"candidates": []}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::Envelope(_)));

        let err = parse_response(r#"{"error": {"code": 500}}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::Envelope(_)));
    }

    #[test]
    fn test_malformed_inner_document() {
        let raw = envelope("```json\n{\"analysis\": {\"overall\": \n```");

        let err = parse_response(&raw).unwrap_err();

        assert!(matches!(err, AnalysisError::Inner(_)));
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {}  "), "{}");
        assert_eq!(strip_code_fence("```json\n{}"), "{}");
        assert_eq!(strip_code_fence("{}\n```"), "{}");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let raw = envelope(r#"{"analysis": {"overall": "Good"}, "safety": ["Warm up"]}"#);

        assert_eq!(parse_response(&raw), parse_response(&raw));
    }
}
