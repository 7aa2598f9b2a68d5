//! Terminal stand-ins for the host capabilities of the scan flow.
//!
//! A terminal has no camera: the "camera" here is a source of already
//! decoded QR text (a literal payload, a file, or stdin), one frame per line.

use crate::core::ports::{Camera, CameraError, CameraSession, Frame, Navigator};
use crate::core::routes::Route;
use crate::ui::messages::info;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tracing::debug;

#[derive(Debug, Clone)]
pub enum TextSource {
    Payload(String),
    File(PathBuf),
    Stdin,
}

pub struct TextCamera {
    source: TextSource,
}

impl TextCamera {
    pub fn new(source: TextSource) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Camera for TextCamera {
    async fn start(&self) -> Result<Box<dyn CameraSession>, CameraError> {
        let reader: Box<dyn AsyncRead + Send + Unpin> = match &self.source {
            TextSource::Payload(text) => {
                return Ok(Box::new(PayloadSession {
                    text: Some(text.clone()),
                }));
            }
            TextSource::File(path) => match tokio::fs::File::open(path).await {
                Ok(f) => Box::new(f),
                Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                    return Err(CameraError::PermissionDenied);
                }
                Err(e) => {
                    return Err(CameraError::StartFailed(format!(
                        "{}: {e}",
                        path.display()
                    )));
                }
            },
            TextSource::Stdin => Box::new(tokio::io::stdin()),
        };

        debug!(source = ?self.source, "text camera started");
        Ok(Box::new(LineSession {
            lines: Some(BufReader::new(reader).lines()),
        }))
    }
}

/// Yields one decoded frame, then the stream ends.
struct PayloadSession {
    text: Option<String>,
}

#[async_trait]
impl CameraSession for PayloadSession {
    async fn next_frame(&mut self) -> Frame {
        match self.text.take() {
            Some(t) => Frame::Decoded(t),
            None => Frame::Closed,
        }
    }

    fn stop(&mut self) {
        self.text = None;
    }
}

/// One frame per line. Blank lines are frames with nothing readable.
struct LineSession {
    lines: Option<Lines<BufReader<Box<dyn AsyncRead + Send + Unpin>>>>,
}

#[async_trait]
impl CameraSession for LineSession {
    async fn next_frame(&mut self) -> Frame {
        let Some(lines) = self.lines.as_mut() else {
            return Frame::Closed;
        };
        match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => Frame::Miss,
            Ok(Some(line)) => Frame::Decoded(line.trim().to_string()),
            Ok(None) => Frame::Closed,
            Err(e) => {
                debug!(error = %e, "text camera read failed");
                Frame::Closed
            }
        }
    }

    fn stop(&mut self) {
        self.lines = None;
    }
}

/// Prints where the app would go and remembers the last route.
#[derive(Default)]
pub struct ConsoleNavigator {
    last: Mutex<Option<Route>>,
}

impl ConsoleNavigator {
    pub fn last(&self) -> Option<Route> {
        self.last.lock().ok().and_then(|g| *g)
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        info(format!("Redirecting to {route}"));
        if let Ok(mut g) = self.last.lock() {
            *g = Some(route);
        }
    }
}
