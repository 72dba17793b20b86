// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod analysis;
pub mod gemini;
pub mod prompt;
pub mod recommendation;
pub mod tasks;

pub use activity::{ActivityProcessor, ProcessResult};
pub use analysis::{AnalysisError, ParsedAnalysis};
pub use gemini::{AiGateway, GeminiClient};
pub use recommendation::{AnalysisOutcome, RecommendationGenerator};
pub use tasks::TasksService;
