//! Capabilities the attendance core needs from its host: a camera that yields
//! decoded QR text, a way to change view, and a way to tell the user something.

use super::routes::Route;
use async_trait::async_trait;
use thiserror::Error;

/// Why a camera could not be started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("camera failed to start: {0}")]
    StartFailed(String),
}

impl CameraError {
    pub fn user_message(&self) -> &'static str {
        match self {
            CameraError::PermissionDenied => "Cannot access camera. Please check permissions.",
            CameraError::StartFailed(_) => "Failed to start camera. Please try again.",
        }
    }
}

/// One result of looking at the camera stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Decoded(String),
    /// Nothing readable in this frame. Expected and frequent.
    Miss,
    /// The stream ended.
    Closed,
}

#[async_trait]
pub trait Camera: Send + Sync {
    async fn start(&self) -> Result<Box<dyn CameraSession>, CameraError>;
}

/// An open camera. Must be stopped once the scan is over; `stop` is
/// synchronous so it can run from `Drop`.
#[async_trait]
pub trait CameraSession: Send {
    async fn next_frame(&mut self) -> Frame;

    fn stop(&mut self);
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

pub trait Notifier: Send + Sync {
    fn info(&self, msg: &str);

    fn success(&self, msg: &str);

    fn error(&self, msg: &str);
}
