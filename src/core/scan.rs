//! QR scan state machine.
//!
//! ```text
//!   Scan ──valid──▶ Select ──submitted──▶ Success
//!    │                 │
//!    └──────▶ Error ◀──┘
//!             │ retry
//!             ▼
//!            Scan
//! ```
//!
//! The camera is only ever open while in `Scan`; every way out of that state
//! (decode, stream end, retry, teardown) stops it first.

use super::attendance::AttendanceStore;
use super::ports::{Camera, CameraSession, Frame, Navigator, Notifier};
use super::routes::Route;
use crate::api::AttendanceRequest;
use crate::models::action::AttendanceAction;
use crate::models::id::RecordId;
use crate::models::location::Location;
use crate::models::qr::ScannedQr;
use crate::utils::time::now_iso;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Token of the fixed payload used by the manual (test mode) path.
pub const MANUAL_QR_TOKEN: &str = "8c05c406-10b9-494b-97bf-c46370b7c391";

pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Enables the manual QR path and its offline fallback.
    pub test_mode: bool,
    /// Delay between a successful submission and the redirect.
    pub redirect_delay: Duration,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            test_mode: false,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }
}

/// Location confirmed by the server for the scanned code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLocation {
    pub location_id: RecordId,
    pub location_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    Scan,
    Select {
        location: ScannedLocation,
        action: Option<AttendanceAction>,
    },
    Success {
        location: ScannedLocation,
        action: AttendanceAction,
    },
    Error {
        message: String,
    },
}

impl ScanState {
    pub fn name(&self) -> &'static str {
        match self {
            ScanState::Scan => "scan",
            ScanState::Select { .. } => "select",
            ScanState::Success { .. } => "success",
            ScanState::Error { .. } => "error",
        }
    }
}

pub struct ScanFlow {
    store: AttendanceStore,
    camera: Arc<dyn Camera>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    options: ScanOptions,
    state: ScanState,
    session: Option<Box<dyn CameraSession>>,
    redirect: Option<JoinHandle<()>>,
}

impl ScanFlow {
    pub fn new(
        store: AttendanceStore,
        camera: Arc<dyn Camera>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        options: ScanOptions,
    ) -> Self {
        Self {
            store,
            camera,
            navigator,
            notifier,
            options,
            state: ScanState::Scan,
            session: None,
            redirect: None,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn is_camera_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn selected_action(&self) -> Option<AttendanceAction> {
        match &self.state {
            ScanState::Select { action, .. } => *action,
            ScanState::Success { action, .. } => Some(*action),
            _ => None,
        }
    }

    /// Submission is possible only in `Select` with an action chosen.
    pub fn can_submit(&self) -> bool {
        matches!(
            self.state,
            ScanState::Select {
                action: Some(_),
                ..
            }
        )
    }

    fn release_camera(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stop();
            debug!("camera released");
        }
    }

    fn fail(&mut self, message: impl Into<String>) {
        self.release_camera();
        let message = message.into();
        info!(%message, "scan flow entered error state");
        self.state = ScanState::Error { message };
    }

    /// Open the camera and read frames until one decodes, then validate it.
    pub async fn scan(&mut self) -> &ScanState {
        if self.state != ScanState::Scan {
            return &self.state;
        }

        if self.session.is_none() {
            match self.camera.start().await {
                Ok(session) => self.session = Some(session),
                Err(e) => {
                    debug!(error = %e, "camera start failed");
                    self.notifier.error(e.user_message());
                    self.fail(e.user_message());
                    return &self.state;
                }
            }
        }

        let decoded = loop {
            let Some(session) = self.session.as_mut() else {
                return &self.state;
            };
            match session.next_frame().await {
                Frame::Decoded(text) => break text,
                Frame::Miss => continue,
                Frame::Closed => {
                    self.fail("Camera closed before a QR code was detected");
                    return &self.state;
                }
            }
        };

        self.handle_decoded(&decoded).await
    }

    /// Stop the camera without leaving `Scan`.
    pub fn cancel(&mut self) {
        self.release_camera();
    }

    /// Handle one decoded QR text: parse, validate remotely, move on.
    pub async fn handle_decoded(&mut self, text: &str) -> &ScanState {
        self.release_camera();
        if self.state != ScanState::Scan {
            return &self.state;
        }

        let scanned = match ScannedQr::parse(text) {
            Ok(s) => s,
            Err(_) => {
                self.notifier.error("Invalid QR Code format");
                self.fail("Invalid QR Code format");
                return &self.state;
            }
        };

        let result = self.store.validate_qr(text, Some(now_iso())).await;

        if result.valid {
            let location_name = result
                .location_name
                .or(scanned.location_name)
                .unwrap_or_else(|| "Office".to_string());
            let location_id = result
                .location_id
                .or_else(|| scanned.location_id.map(RecordId::Text))
                .unwrap_or_default();

            self.state = ScanState::Select {
                location: ScannedLocation {
                    location_id,
                    location_name,
                },
                action: None,
            };
        } else {
            self.fail(result.message.unwrap_or_else(|| "Invalid QR Code".into()));
        }

        &self.state
    }

    /// Skip the camera and validate a fixed payload. Test mode only: when
    /// validation fails the first demo location is used instead.
    pub async fn manual(&mut self) -> &ScanState {
        self.release_camera();
        if self.state != ScanState::Scan {
            return &self.state;
        }

        if !self.options.test_mode {
            self.fail("Manual QR entry is only available in test mode");
            return &self.state;
        }

        let payload = serde_json::json!({
            "qr_data": MANUAL_QR_TOKEN,
            "scan_time": now_iso(),
        })
        .to_string();

        let result = self.store.validate_qr(&payload, None).await;

        let location = match (result.valid, result.location_id) {
            (true, Some(location_id)) => ScannedLocation {
                location_id,
                location_name: result.location_name.unwrap_or_else(|| "Office".into()),
            },
            _ => {
                info!("manual QR not accepted, using demo location");
                let demo = Location::demo_list().remove(0);
                ScannedLocation {
                    location_id: demo.id,
                    location_name: demo.name,
                }
            }
        };

        self.state = ScanState::Select {
            location,
            action: None,
        };
        &self.state
    }

    /// Choose the action to record. Ignored outside `Select`.
    pub fn select_action(&mut self, chosen: AttendanceAction) {
        if let ScanState::Select { action, .. } = &mut self.state {
            *action = Some(chosen);
        }
    }

    /// Record the selected action at the scanned location.
    pub async fn submit(&mut self) -> &ScanState {
        let (location, action) = match &self.state {
            ScanState::Select {
                location,
                action: Some(action),
            } => (location.clone(), *action),
            ScanState::Select { action: None, .. } => {
                self.notifier.error("Please select an action");
                return &self.state;
            }
            _ => return &self.state,
        };

        let request = AttendanceRequest {
            action,
            time: now_iso(),
            location_id: location.location_id.clone(),
            location_name: location.location_name.clone(),
        };

        let outcome = self.store.submit_attendance(&request).await;

        if outcome.success {
            self.state = ScanState::Success { location, action };
            self.schedule_redirect();
        } else {
            self.fail(
                outcome
                    .message
                    .unwrap_or_else(|| "Failed to record attendance".into()),
            );
        }

        &self.state
    }

    fn schedule_redirect(&mut self) {
        let navigator = Arc::clone(&self.navigator);
        let delay = self.options.redirect_delay;
        self.redirect = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate(Route::Attendance);
        }));
    }

    /// Wait for the pending redirect, if any.
    pub async fn wait_redirect(&mut self) {
        if let Some(handle) = self.redirect.take() {
            let _ = handle.await;
        }
    }

    pub fn has_pending_redirect(&self) -> bool {
        self.redirect.is_some()
    }

    /// Back to `Scan` with nothing carried over. Only from `Error`.
    pub fn retry(&mut self) {
        if matches!(self.state, ScanState::Error { .. }) {
            self.release_camera();
            self.state = ScanState::Scan;
        }
    }
}

impl Drop for ScanFlow {
    fn drop(&mut self) {
        self.release_camera();
    }
}
