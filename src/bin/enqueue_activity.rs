// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Push an activity event onto the analysis queue.
//!
//! Usage: `enqueue_activity <service-url> < activity.json`
//!
//! Reads one Activity JSON document from stdin and creates a Cloud Task
//! targeting the worker at `<service-url>`. Useful for replaying events.

use activity_advisor::{models::Activity, services::TasksService};
use std::env;
use std::io::Read;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let service_url = env::args()
        .nth(1)
        .ok_or("usage: enqueue_activity <service-url> < activity.json")?;

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let activity: Activity = serde_json::from_str(&input)?;

    dotenvy::dotenv().ok();
    let project_id = env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string());
    let region = env::var("GCP_REGION").unwrap_or_else(|_| "us-west1".to_string());
    let tasks = TasksService::new(&project_id, &region);
    tasks.queue_activity(&service_url, &activity).await?;

    tracing::info!(
        activity_id = %activity.id,
        queue = %tasks.queue_path(),
        "Activity queued"
    );
    Ok(())
}
