//! REST client for the tracker's `/api` endpoints.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use timekeep_core::models::project::{CreateProject, Project, ProjectWithTasks};
use timekeep_core::models::task::{CreateTask, Task};

use crate::error::ClientError;

/// The server operations the project store depends on.
#[async_trait]
pub trait TrackerApi: Send + Sync {
    /// Fetch every project with its tasks.
    async fn list_projects(&self) -> Result<Vec<ProjectWithTasks>, ClientError>;

    async fn create_project(&self, input: &CreateProject) -> Result<Project, ClientError>;

    /// Returns whether the server actually removed a row.
    async fn delete_project(&self, id: &str) -> Result<bool, ClientError>;

    async fn create_task(&self, input: &CreateTask) -> Result<Task, ClientError>;

    /// Returns whether the server actually removed a row.
    async fn delete_task(&self, id: &str) -> Result<bool, ClientError>;

    /// Advance the task's status cycle.
    async fn toggle_task(&self, id: &str) -> Result<Task, ClientError>;

    /// Add `minutes` (possibly negative) to the task's tracked time.
    async fn add_task_time(&self, id: &str, minutes: i64) -> Result<Task, ClientError>;
}

/// [`TrackerApi`] over HTTP using [`reqwest`].
#[derive(Debug, Clone)]
pub struct HttpTrackerApi {
    client: reqwest::Client,
    api_url: String,
}

#[derive(Deserialize)]
struct SuccessBody {
    success: bool,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpTrackerApi {
    /// Create a client for a server root such as `http://localhost:3000`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            api_url: format!("{}/api", base_url.trim_end_matches('/')),
        }
    }

    /// The `/api` prefix every request is sent under.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn patch_task(&self, id: &str, body: serde_json::Value) -> Result<Task, ClientError> {
        let response = self
            .client
            .patch(format!("{}/tasks", self.api_url))
            .query(&[("id", id)])
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn delete(&self, resource: &str, id: &str) -> Result<bool, ClientError> {
        let response = self
            .client
            .delete(format!("{}/{resource}", self.api_url))
            .query(&[("id", id)])
            .send()
            .await?;

        let body: SuccessBody = Self::parse_response(response).await?;
        Ok(body.success)
    }

    /// Turn a non-2xx response into a [`ClientError`], preferring the
    /// server's `{"error": ...}` message over the raw body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|parsed| parsed.error)
            .unwrap_or(body);

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(message));
        }
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl TrackerApi for HttpTrackerApi {
    async fn list_projects(&self) -> Result<Vec<ProjectWithTasks>, ClientError> {
        let response = self
            .client
            .get(format!("{}/projects", self.api_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn create_project(&self, input: &CreateProject) -> Result<Project, ClientError> {
        let response = self
            .client
            .post(format!("{}/projects", self.api_url))
            .json(input)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn delete_project(&self, id: &str) -> Result<bool, ClientError> {
        self.delete("projects", id).await
    }

    async fn create_task(&self, input: &CreateTask) -> Result<Task, ClientError> {
        let response = self
            .client
            .post(format!("{}/tasks", self.api_url))
            .json(input)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn delete_task(&self, id: &str) -> Result<bool, ClientError> {
        self.delete("tasks", id).await
    }

    async fn toggle_task(&self, id: &str) -> Result<Task, ClientError> {
        self.patch_task(id, json!({"action": "toggle"})).await
    }

    async fn add_task_time(&self, id: &str, minutes: i64) -> Result<Task, ClientError> {
        self.patch_task(id, json!({"action": "addTime", "minutes": minutes}))
            .await
    }
}
