use const_format::concatcp;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::board::StatusUpdater;
use crate::error::{Result, TaskboardError};
use crate::types::{DeveloperOption, DeveloperTaskCount, Role, StatusUpdate, Task, TaskForm};

const USER_AGENT: &str = concatcp!("taskboard/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the task-tracking backend.
pub struct TaskboardClient {
    http: Client,
    base: Url,
    token: Option<String>,
}

#[derive(Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: Role,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordReset<'a> {
    pub token: &'a str,
    pub new_password: &'a str,
    pub confirm_password: &'a str,
}

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl TaskboardClient {
    pub fn new(base: Url) -> Self {
        Self {
            http: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base,
            token: None,
        }
    }

    /// Client that sends `token` as a bearer credential.
    pub fn with_token(base: Url, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::new(base)
        }
    }

    // Auth

    /// A rejected login carries only the backend's message; an unreadable reply is
    /// reported as the login being unavailable.
    pub async fn login(&self, credentials: &Credentials<'_>) -> Result<LoginResponse> {
        let request = self.request(Method::POST, &["auth", "login"])?.json(credentials);
        let response = request
            .send()
            .await
            .map_err(|e| TaskboardError::LoginUnavailable(Some(e)))?;

        let status = response.status();
        debug!(status = status.as_u16(), "login response");
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| TaskboardError::LoginUnavailable(Some(e)));
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => Err(TaskboardError::LoginRejected(
                parsed.message.filter(|m| !m.trim().is_empty()),
            )),
            Err(_) => Err(TaskboardError::LoginUnavailable(None)),
        }
    }

    pub async fn logout(&self) -> Result<()> {
        let request = self.request(Method::POST, &["auth", "logout"])?;
        self.send_empty(request).await
    }

    pub async fn register(&self, registration: &Registration<'_>) -> Result<()> {
        let request = self
            .request(Method::POST, &["auth", "register"])?
            .json(registration);
        self.send_empty(request).await
    }

    pub async fn resend_activation(&self, email: &str) -> Result<()> {
        let request = self
            .request(Method::POST, &["auth", "resend-activation"])?
            .json(&EmailBody { email });
        self.send_empty(request).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        let request = self
            .request(Method::POST, &["auth", "forgot-password"])?
            .json(&EmailBody { email });
        self.send_empty(request).await
    }

    pub async fn reset_password(&self, reset: &PasswordReset<'_>) -> Result<()> {
        let request = self
            .request(Method::POST, &["auth", "reset-password"])?
            .json(reset);
        self.send_empty(request).await
    }

    // Tasks

    pub async fn lead_tasks(&self, email: &str) -> Result<Vec<Task>> {
        let request = self.request(Method::GET, &["task", "lead", email])?;
        self.send_json(request).await
    }

    /// Number of tasks the lead has created.
    pub async fn lead_task_count(&self, email: &str) -> Result<i64> {
        let request = self.request(Method::GET, &["task", "lead", email, "count"])?;
        self.send_json(request).await
    }

    pub async fn developer_tasks(&self, email: &str) -> Result<Vec<Task>> {
        let request = self.request(Method::GET, &["task", "developer", email])?;
        self.send_json(request).await
    }

    pub async fn developer_dropdown(&self) -> Result<Vec<DeveloperOption>> {
        let request = self.request(Method::GET, &["task", "developers", "dropdown"])?;
        self.send_json(request).await
    }

    pub async fn create_task(&self, form: &TaskForm) -> Result<Task> {
        let request = self
            .request(Method::POST, &["task", "create-task"])?
            .json(form);
        self.send_json(request).await
    }

    pub async fn update_task(&self, id: i64, form: &TaskForm) -> Result<Task> {
        let id = id.to_string();
        let request = self
            .request(Method::PUT, &["task", "update-task", &id])?
            .json(form);
        self.send_json(request).await
    }

    pub async fn delete_task(&self, id: i64) -> Result<()> {
        let id = id.to_string();
        let request = self.request(Method::DELETE, &["task", "delete-task", &id])?;
        self.send_empty(request).await
    }

    // Team

    pub async fn team_developers(&self, lead_email: &str) -> Result<Vec<DeveloperTaskCount>> {
        let request = self.request(Method::GET, &["team", lead_email, "developers"])?;
        self.send_json(request).await
    }

    /// Build the URL for `segments` below the base URL. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| TaskboardError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "backend request");

        let request = self.http.request(method, url);
        Ok(match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<()> {
        check_status(request.send().await?).await?;
        Ok(())
    }
}

impl StatusUpdater for TaskboardClient {
    async fn update_task_status(&self, update: StatusUpdate) -> Result<()> {
        let request = self
            .request(Method::PATCH, &["task", "update-task-status"])?
            .json(&update);
        self.send_empty(request).await
    }
}

/// Turn a non-2xx response into [`TaskboardError::Api`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    debug!(status = status.as_u16(), url = %response.url(), "backend response");
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(TaskboardError::Api {
        status: status.as_u16(),
        message: backend_message(&body),
    })
}

/// Message from an error body: the JSON `message` field, else the raw text.
fn backend_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message.filter(|m| !m.trim().is_empty()),
        Err(_) => Some(body.to_string()),
    }
}
