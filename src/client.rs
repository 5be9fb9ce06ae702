//! Client for the remote task service.

use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::blocking::{Client, RequestBuilder, Response};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::horizon::cutoff_param;
use crate::models::{NewTask, Task, TaskId};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Operations the task list needs from the remote service.
pub trait TaskService {
    /// All tasks whose estimate is at or before `until`.
    fn list_tasks(&self, until: NaiveDateTime) -> Result<Vec<Task>, ServiceError>;
    /// Creates a task. Returns the created task when the service echoes it.
    fn create_task(&self, task: &NewTask) -> Result<Option<Task>, ServiceError>;
    /// Flips the completion state of a task.
    fn toggle_task(&self, id: TaskId) -> Result<(), ServiceError>;
    fn delete_task(&self, id: TaskId) -> Result<(), ServiceError>;
}

/// [`TaskService`] over HTTP + JSON.
pub struct HttpTaskService {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTaskService {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, ServiceError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

impl TaskService for HttpTaskService {
    #[tracing::instrument(skip(self))]
    fn list_tasks(&self, until: NaiveDateTime) -> Result<Vec<Task>, ServiceError> {
        let date = cutoff_param(until);
        debug!(url = %self.base_url, %date, "listing tasks");
        let response = self.send(self.client.get(self.url("/tasks")).query(&[("date", date)]))?;
        let body = response.text()?;
        let tasks: Vec<Task> = serde_json::from_str(&body)?;
        debug!(count = tasks.len(), "tasks received");
        Ok(tasks)
    }

    #[tracing::instrument(skip(self, task), fields(desc = %task.desc))]
    fn create_task(&self, task: &NewTask) -> Result<Option<Task>, ServiceError> {
        let response = self.send(self.client.post(self.url("/tasks")).json(task))?;
        let body = response.text()?;
        info!("task created");
        if body.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str(&body) {
            Ok(task) => Ok(Some(task)),
            Err(e) => {
                warn!(error = %e, "created task body not understood");
                Ok(None)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    fn toggle_task(&self, id: TaskId) -> Result<(), ServiceError> {
        self.send(self.client.put(self.url(&format!("/taskToggle/{}", id))))?;
        info!(id, "task toggled");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn delete_task(&self, id: TaskId) -> Result<(), ServiceError> {
        self.send(self.client.delete(self.url(&format!("/tasks/{}", id))))?;
        info!(id, "task deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let service = HttpTaskService::new("http://localhost:3000/", None, Duration::from_secs(1)).unwrap();
        assert_eq!(service.base_url(), "http://localhost:3000");
        assert_eq!(service.url("/tasks/4"), "http://localhost:3000/tasks/4");
    }
}
