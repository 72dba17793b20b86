// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity Advisor: AI coaching recommendations for recorded workouts
//!
//! This crate provides the worker that receives activity events from a
//! Cloud Tasks queue, asks Gemini to analyze each one, and stores the
//! resulting recommendation.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use services::ActivityProcessor;

/// Shared application state.
pub struct AppState {
    pub processor: ActivityProcessor,
}
