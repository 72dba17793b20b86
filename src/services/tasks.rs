// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cloud Tasks publisher for activity events.
//!
//! The activity service uses this to push each new activity onto the
//! `activity-analysis` queue. Cloud Tasks then delivers it to
//! `/tasks/analyze-activity`, retrying until the handler answers 2xx.
//!
//! Uses the official google-cloud-tasks-v2 SDK.

use crate::config::{ACTIVITY_QUEUE_NAME, ANALYZE_ACTIVITY_PATH};
use crate::error::AppError;
use crate::error::Result;
use crate::models::Activity;

/// Cloud Tasks client wrapper.
pub struct TasksService {
    project_id: String,
    location: String,
    queue_name: String,
}

impl TasksService {
    pub fn new(project_id: &str, region: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            location: region.to_string(),
            queue_name: ACTIVITY_QUEUE_NAME.to_string(),
        }
    }

    /// Full resource name of the activity queue.
    pub fn queue_path(&self) -> String {
        format!(
            "projects/{}/locations/{}/queues/{}",
            self.project_id, self.location, self.queue_name
        )
    }

    /// Queue a single activity for analysis.
    pub async fn queue_activity(&self, service_url: &str, activity: &Activity) -> Result<()> {
        tracing::info!(
            activity_id = %activity.id,
            user_id = %activity.user_id,
            "Queuing activity for analysis"
        );
        self.queue_task(service_url, ANALYZE_ACTIVITY_PATH, activity)
            .await
    }

    /// Generic task queuing helper.
    async fn queue_task<T: serde::Serialize>(
        &self,
        service_url: &str,
        endpoint: &str,
        payload: &T,
    ) -> Result<()> {
        use google_cloud_tasks_v2::client::CloudTasks;
        use google_cloud_tasks_v2::model::{HttpRequest, OidcToken, Task};

        let client = CloudTasks::builder()
            .build()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Cloud Tasks client error: {}", e)))?;

        let body = serde_json::to_vec(payload)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("JSON error: {}", e)))?;

        let http_request = HttpRequest::default()
            .set_url(task_url(service_url, endpoint))
            .set_http_method("POST")
            .set_body(axum::body::Bytes::from(body))
            .set_headers(std::collections::HashMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]))
            .set_oidc_token(
                OidcToken::default()
                    .set_service_account_email(format!(
                        "activity-advisor@{}.iam.gserviceaccount.com",
                        self.project_id
                    ))
                    .set_audience(service_url.to_string()),
            );

        let task = Task::default().set_http_request(http_request);

        let _response = client
            .create_task()
            .set_parent(self.queue_path())
            .set_task(task)
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Cloud Tasks create error: {}", e)))?;

        Ok(())
    }
}

/// Target URL for a task, tolerating a trailing slash on the service URL.
fn task_url(service_url: &str, endpoint: &str) -> String {
    format!("{}{}", service_url.trim_end_matches('/'), endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_path_uses_activity_queue() {
        let service = TasksService::new("test-project", "us-central1");

        assert_eq!(
            service.queue_path(),
            "projects/test-project/locations/us-central1/queues/activity-analysis"
        );
    }

    #[test]
    fn task_url_joins_endpoint() {
        assert_eq!(
            task_url("https://advisor.example.run.app/", ANALYZE_ACTIVITY_PATH),
            "https://advisor.example.run.app/tasks/analyze-activity"
        );
        assert_eq!(
            task_url("http://localhost:8080", ANALYZE_ACTIVITY_PATH),
            "http://localhost:8080/tasks/analyze-activity"
        );
    }
}
