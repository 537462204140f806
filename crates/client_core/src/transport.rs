//! HTTP client for the greeter backend.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{Task, TaskId, TaskStatus},
    error::{ApiError, ApiException},
    protocol::{
        AddTaskResponse, ChangeStatusRequest, GreetRequest, GreetResponse, PageQuery, TaskAck,
        TaskList, UpdateDescriptionRequest,
    },
};
use tracing::debug;
use url::Url;

use crate::GreetingBackend;

pub struct HttpBackendClient {
    http: Client,
    server_url: String,
}

impl HttpBackendClient {
    pub fn new(server_url: &str) -> Result<Self> {
        let parsed = Url::parse(server_url.trim())
            .with_context(|| format!("invalid server url '{server_url}'"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "server url must use http or https, got '{}'",
                parsed.scheme()
            );
        }
        Ok(Self {
            http: Client::new(),
            server_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.server_url)
    }

    pub async fn add_task(&self, task: &Task) -> Result<TaskId> {
        let res = self
            .http
            .post(self.endpoint("/tasks"))
            .json(task)
            .send()
            .await?;
        let body: AddTaskResponse = check(res).await?.json().await?;
        Ok(body.task_id)
    }

    pub async fn list_tasks(&self) -> Result<TaskList> {
        let res = self.http.get(self.endpoint("/tasks")).send().await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn list_tasks_page(&self, page_no: u64, page_size: u64) -> Result<TaskList> {
        let res = self
            .http
            .get(self.endpoint("/tasks/page"))
            .query(&PageQuery { page_no, page_size })
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn change_task_status(&self, task_id: TaskId, status: TaskStatus) -> Result<()> {
        let res = self
            .http
            .put(self.endpoint(&format!("/tasks/{task_id}/status")))
            .json(&ChangeStatusRequest { status })
            .send()
            .await?;
        let _: TaskAck = check(res).await?.json().await?;
        Ok(())
    }

    pub async fn update_task_description(&self, task_id: TaskId, description: &str) -> Result<()> {
        let res = self
            .http
            .put(self.endpoint(&format!("/tasks/{task_id}/description")))
            .json(&UpdateDescriptionRequest {
                description: description.to_string(),
            })
            .send()
            .await?;
        let _: TaskAck = check(res).await?.json().await?;
        Ok(())
    }

    pub async fn delete_task(&self, task_id: TaskId) -> Result<()> {
        let res = self
            .http
            .delete(self.endpoint(&format!("/tasks/{task_id}")))
            .send()
            .await?;
        let _: TaskAck = check(res).await?.json().await?;
        Ok(())
    }
}

#[async_trait]
impl GreetingBackend for HttpBackendClient {
    async fn greet(&self, name: &str) -> Result<String> {
        let res = self
            .http
            .post(self.endpoint("/greet"))
            .json(&GreetRequest {
                name: name.to_string(),
            })
            .send()
            .await?;
        let body: GreetResponse = check(res).await?.json().await?;
        debug!(greeting_len = body.greeting.len(), "greet resolved");
        Ok(body.greeting)
    }
}

/// Passes 2xx responses through; otherwise surfaces the server's `ApiError`
/// message when the body carries one.
async fn check(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiError>(&body) {
        Ok(err) => Err(anyhow!("{status}: {}", ApiException::from(err))),
        Err(_) if body.is_empty() => Err(anyhow!("{status}")),
        Err(_) => Err(anyhow!("{status}: {body}")),
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
