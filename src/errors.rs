//! Unified application error type.
//! All modules (api, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Remote API
    // ---------------------------
    #[error("Network error: {0}")]
    Transport(String),

    #[error("{0}")]
    Fetch(String),

    #[error("Server responded with status {status}{}", message_suffix(.message))]
    Remote { status: u16, message: Option<String> },

    // ---------------------------
    // Attendance domain
    // ---------------------------
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("QR validation error: {0}")]
    Validation(String),

    #[error("Attendance submission error: {0}")]
    Submission(String),

    #[error("QR code error: {0}")]
    Qr(String),

    // ---------------------------
    // Input / config
    // ---------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// The `message` field of the server error payload, if the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Remote {
                message: Some(m), ..
            } => Some(m.as_str()),
            _ => None,
        }
    }

    /// Message shown to the user: server payload first, then the transport
    /// error text, then `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            AppError::Remote {
                message: Some(m), ..
            } => m.clone(),
            AppError::Remote { message: None, .. } => fallback.to_string(),
            AppError::Transport(m) if !m.is_empty() => m.clone(),
            AppError::Transport(_) => fallback.to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Remote { status: 401, .. })
    }
}

impl From<qrcode::types::QrError> for AppError {
    fn from(e: qrcode::types::QrError) -> Self {
        AppError::Qr(e.to_string())
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

pub type AppResult<T> = Result<T, AppError>;
