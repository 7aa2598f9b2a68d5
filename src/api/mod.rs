//! Remote attendance API: the ports the stores talk to, and the request /
//! response types exchanged over the wire.
//!
//! List-like endpoints return the raw JSON body; [`normalize`] turns the
//! different shapes the server uses into canonical models at the store
//! boundary.

pub mod http;
pub mod normalize;

use crate::errors::AppResult;
use crate::models::action::AttendanceAction;
use crate::models::id::RecordId;
use crate::models::session::{Credentials, RegisterProfile, User};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use http::HttpApi;

//=========================================================================================
// Wire types
//=========================================================================================

/// Response of `/login` and `/register`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateQrRequest {
    pub qr_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_time: Option<String>,
}

/// Result of a QR validation. `valid` is the only discriminant callers branch on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QrValidation {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub location_id: Option<RecordId>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl QrValidation {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
            ..Default::default()
        }
    }
}

/// Event sent to `POST /attendance`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRequest {
    pub action: AttendanceAction,
    pub time: String,
    pub location_id: RecordId,
    pub location_name: String,
}

/// Result of an attendance submission. `success` is the only discriminant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmitOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Response of `POST /attendance/generate-qr`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratedQr {
    pub qr_data: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Filter for history and export requests. Values are forwarded verbatim as
/// query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub extra: Vec<(String, String)>,
}

impl HistoryFilter {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            extra: Vec::new(),
        }
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut q = Vec::new();
        if let Some(d) = self.start_date {
            q.push(("start_date".to_string(), d.format("%Y-%m-%d").to_string()));
        }
        if let Some(d) = self.end_date {
            q.push(("end_date".to_string(), d.format("%Y-%m-%d").to_string()));
        }
        q.extend(self.extra.iter().cloned());
        q
    }
}

//=========================================================================================
// Ports
//=========================================================================================

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> AppResult<AuthResponse>;

    async fn register(&self, profile: &RegisterProfile) -> AppResult<AuthResponse>;

    async fn logout(&self, token: &str) -> AppResult<()>;

    /// Raw body of `GET /me`; see [`normalize::profile`].
    async fn me(&self, token: &str) -> AppResult<Value>;
}

#[async_trait]
pub trait AttendanceApi: Send + Sync {
    async fn today(&self) -> AppResult<Value>;

    async fn history(&self, filter: &HistoryFilter) -> AppResult<Value>;

    async fn status(&self) -> AppResult<Value>;

    async fn summary(&self, month: &str) -> AppResult<Value>;

    async fn validate_qr(&self, request: &ValidateQrRequest) -> AppResult<QrValidation>;

    async fn record(&self, request: &AttendanceRequest) -> AppResult<SubmitOutcome>;

    async fn generate_qr(&self, location_id: &str) -> AppResult<GeneratedQr>;

    async fn locations(&self) -> AppResult<Value>;

    async fn export(&self, filter: &HistoryFilter) -> AppResult<Vec<u8>>;
}
