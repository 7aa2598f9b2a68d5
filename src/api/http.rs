//! `reqwest` implementation of the API ports.

use super::{
    AttendanceApi, AttendanceRequest, AuthApi, AuthResponse, GeneratedQr, HistoryFilter,
    QrValidation, SubmitOutcome, ValidateQrRequest,
};
use crate::errors::{AppError, AppResult};
use crate::models::session::{Credentials, RegisterProfile};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// HTTP client for the attendance backend.
///
/// Attendance endpoints use the token given to [`HttpApi::with_token`]; auth
/// endpoints receive the token explicitly.
#[derive(Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("rattendance/", env!("CARGO_PKG_VERSION")));
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = method.as_str(), url = url.as_str(), "api request");

        let builder = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");

        match token {
            Some(t) => builder.bearer_auth(t),
            None => builder,
        }
    }

    fn authed(&self, method: Method, path: &str) -> RequestBuilder {
        self.request(method, path, self.token.as_deref())
    }
}

/// Send the request and turn non-2xx answers into `AppError::Remote`,
/// keeping the `message` of the JSON error payload when there is one.
async fn send(builder: RequestBuilder) -> AppResult<Response> {
    let response = builder
        .send()
        .await
        .map_err(|e| AppError::Transport(format!("Failed to send request: {e}")))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string));

    debug!(status = status.as_u16(), ?message, "api error response");
    Err(AppError::Remote {
        status: status.as_u16(),
        message,
    })
}

async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> AppResult<T> {
    let response = send(builder).await?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::Transport(format!("Failed to read response body: {e}")))?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> AppResult<AuthResponse> {
        send_json(self.request(Method::POST, "/login", None).json(credentials)).await
    }

    async fn register(&self, profile: &RegisterProfile) -> AppResult<AuthResponse> {
        send_json(self.request(Method::POST, "/register", None).json(profile)).await
    }

    async fn logout(&self, token: &str) -> AppResult<()> {
        send(self.request(Method::POST, "/logout", Some(token)))
            .await
            .map(|_| ())
    }

    async fn me(&self, token: &str) -> AppResult<Value> {
        send_json(self.request(Method::GET, "/me", Some(token))).await
    }
}

#[async_trait]
impl AttendanceApi for HttpApi {
    async fn today(&self) -> AppResult<Value> {
        send_json(self.authed(Method::GET, "/attendance/today")).await
    }

    async fn history(&self, filter: &HistoryFilter) -> AppResult<Value> {
        let query = filter.to_query();
        send_json(self.authed(Method::GET, "/attendance/history").query(&query)).await
    }

    async fn status(&self) -> AppResult<Value> {
        send_json(self.authed(Method::GET, "/attendance/status")).await
    }

    async fn summary(&self, month: &str) -> AppResult<Value> {
        send_json(
            self.authed(Method::GET, "/attendance/summary")
                .query(&[("month", month)]),
        )
        .await
    }

    async fn validate_qr(&self, request: &ValidateQrRequest) -> AppResult<QrValidation> {
        send_json(
            self.authed(Method::POST, "/attendance/validate-qr")
                .json(request),
        )
        .await
    }

    async fn record(&self, request: &AttendanceRequest) -> AppResult<SubmitOutcome> {
        send_json(self.authed(Method::POST, "/attendance").json(request)).await
    }

    async fn generate_qr(&self, location_id: &str) -> AppResult<GeneratedQr> {
        send_json(
            self.authed(Method::POST, "/attendance/generate-qr")
                .json(&json!({ "location_id": location_id })),
        )
        .await
    }

    async fn locations(&self) -> AppResult<Value> {
        send_json(self.authed(Method::GET, "/attendance/locations")).await
    }

    async fn export(&self, filter: &HistoryFilter) -> AppResult<Vec<u8>> {
        let query = filter.to_query();
        let response = send(self.authed(Method::GET, "/attendance/export").query(&query)).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read export: {e}")))?;
        Ok(bytes.to_vec())
    }
}
