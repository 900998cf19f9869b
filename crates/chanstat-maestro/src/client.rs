use crate::types::{AlertPayload, ErrorCreated, ErrorPayload, FinishPayload};
use crate::{AlertType, Error, Execution, Result};
use chanstat_core::FinishStatus;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use url::Url;

/// HTTP client for the orchestration platform.
///
/// Authenticated with a `token` header. When no server is configured the
/// client is "disconnected": every call logs and returns Ok so the bot can
/// run locally without a platform behind it.
pub struct MaestroClient {
    base: Option<String>,
    token: String,
    http: reqwest::Client,
}

impl MaestroClient {
    /// Create a connected client for the given server URL.
    pub fn new(server: &str, token: &str) -> Result<Self> {
        let parsed = Url::parse(server).map_err(|source| Error::InvalidServer {
            url: server.to_string(),
            source,
        })?;

        Ok(Self {
            base: Some(parsed.as_str().trim_end_matches('/').to_string()),
            token: token.to_string(),
            http: reqwest::Client::new(),
        })
    }

    /// Create a client with no server behind it.
    pub fn disconnected() -> Self {
        Self {
            base: None,
            token: String::new(),
            http: reqwest::Client::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.base.is_some()
    }

    fn endpoint(&self, path: &str) -> Option<String> {
        self.base.as_ref().map(|base| format!("{}/{}", base, path))
    }

    /// Fetch the execution context for a task: its id and parameter map.
    /// Disconnected clients yield an empty parameter map so local overrides
    /// can fill it in.
    pub async fn get_execution(&self, task_id: &str) -> Result<Execution> {
        let Some(endpoint) = self.endpoint(&format!("api/v2/task/{}", task_id)) else {
            tracing::debug!("Maestro not connected, empty execution for task {}", task_id);
            return Ok(Execution {
                task_id: task_id.to_string(),
                parameters: HashMap::new(),
            });
        };

        let response = self
            .http
            .get(&endpoint)
            .header("token", &self.token)
            .send()
            .await
            .map_err(|e| Error::request(&endpoint, e))?
            .error_for_status()
            .map_err(|e| Error::request(&endpoint, e))?;

        response
            .json::<Execution>()
            .await
            .map_err(|e| Error::request(&endpoint, e))
    }

    /// Emit a progress alert on the platform.
    pub async fn alert(
        &self,
        task_id: &str,
        title: &str,
        message: &str,
        alert_type: AlertType,
    ) -> Result<()> {
        let Some(endpoint) = self.endpoint("api/v2/alerts") else {
            tracing::debug!("Maestro not connected, skipping alert '{}'", title);
            return Ok(());
        };

        let payload = AlertPayload {
            task_id,
            title,
            message,
            alert_type: alert_type.as_str(),
        };
        self.post_json(&endpoint, &payload).await
    }

    /// Append one row to a structured log on the platform.
    pub async fn new_log_entry(
        &self,
        activity_label: &str,
        values: &HashMap<String, String>,
    ) -> Result<()> {
        let Some(endpoint) = self.endpoint(&format!("api/v2/log/{}/entry", activity_label)) else {
            tracing::debug!("Maestro not connected, skipping log entry for {}", activity_label);
            return Ok(());
        };

        self.post_json(&endpoint, values).await
    }

    /// Report an error for a task, with a tag map and an optional screenshot
    /// attached to the created error record.
    pub async fn report_error(
        &self,
        task_id: &str,
        message: &str,
        tags: &HashMap<String, String>,
        screenshot: Option<&Path>,
    ) -> Result<()> {
        let Some(endpoint) = self.endpoint("api/v2/error") else {
            tracing::debug!("Maestro not connected, skipping error report: {}", message);
            return Ok(());
        };

        let payload = ErrorPayload {
            task_id,
            message,
            tags,
        };

        let response = self
            .http
            .post(&endpoint)
            .header("token", &self.token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::request(&endpoint, e))?
            .error_for_status()
            .map_err(|e| Error::request(&endpoint, e))?;

        let created = response
            .json::<ErrorCreated>()
            .await
            .map_err(|e| Error::request(&endpoint, e))?;

        if let Some(path) = screenshot {
            self.attach_screenshot(created.id, path).await?;
        }

        Ok(())
    }

    async fn attach_screenshot(&self, error_id: u64, path: &Path) -> Result<()> {
        // report_error checked connectivity already
        let Some(endpoint) = self.endpoint(&format!("api/v2/error/{}/screenshot", error_id)) else {
            return Ok(());
        };

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "erro.png".to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("image/png")
            .map_err(|e| Error::request(&endpoint, e))?;
        let form = Form::new().part("file", part);

        self.http
            .post(&endpoint)
            .header("token", &self.token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::request(&endpoint, e))?
            .error_for_status()
            .map_err(|e| Error::request(&endpoint, e))?;

        Ok(())
    }

    /// Upload a file as a named artifact of the task.
    pub async fn post_artifact(
        &self,
        task_id: &str,
        artifact_name: &str,
        filepath: &Path,
    ) -> Result<()> {
        let Some(endpoint) = self.endpoint("api/v2/artifact") else {
            tracing::debug!("Maestro not connected, skipping artifact '{}'", artifact_name);
            return Ok(());
        };

        let bytes = tokio::fs::read(filepath).await?;
        let part = Part::bytes(bytes)
            .file_name(artifact_name.to_string())
            .mime_str("text/plain")
            .map_err(|e| Error::request(&endpoint, e))?;
        let form = Form::new()
            .text("taskId", task_id.to_string())
            .text("name", artifact_name.to_string())
            .part("file", part);

        self.http
            .post(&endpoint)
            .header("token", &self.token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::request(&endpoint, e))?
            .error_for_status()
            .map_err(|e| Error::request(&endpoint, e))?;

        Ok(())
    }

    /// Signal task completion with the terminal status and item counts.
    pub async fn finish_task(
        &self,
        task_id: &str,
        status: FinishStatus,
        message: &str,
        total_items: usize,
        processed_items: usize,
        failed_items: usize,
    ) -> Result<()> {
        let Some(endpoint) = self.endpoint(&format!("api/v2/task/{}", task_id)) else {
            tracing::debug!(
                "Maestro not connected, finishing task {} locally: {} ({})",
                task_id,
                status,
                message
            );
            return Ok(());
        };

        let payload = FinishPayload {
            state: "FINISHED",
            finish_status: status.as_str(),
            finish_message: message,
            total_items,
            processed_items,
            failed_items,
        };
        self.post_json(&endpoint, &payload).await
    }

    async fn post_json<T: Serialize + ?Sized>(&self, endpoint: &str, payload: &T) -> Result<()> {
        self.http
            .post(endpoint)
            .header("token", &self.token)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::request(endpoint, e))?
            .error_for_status()
            .map_err(|e| Error::request(endpoint, e))?;

        Ok(())
    }
}
