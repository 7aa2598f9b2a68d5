//! Attendance data store: today's events, history, status and summary, plus
//! the two mutations the scanner needs (QR validation and event submission).
//!
//! Each fetch owns one slice of state. A failing fetch keeps the previous
//! value of its slice and records an error for that slice only, so fetches
//! running side by side never step on each other.

use super::ports::Notifier;
use crate::api::{
    AttendanceApi, AttendanceRequest, HistoryFilter, QrValidation, SubmitOutcome,
    ValidateQrRequest, normalize,
};
use crate::errors::{AppError, AppResult};
use crate::models::event::AttendanceEvent;
use crate::models::status::CurrentStatus;
use crate::models::summary::Summary;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSlice {
    Today,
    History,
    Status,
    Summary,
}

#[derive(Debug, Clone, Default)]
struct Slice<T> {
    value: T,
    error: Option<String>,
}

#[derive(Debug, Default)]
struct AttendanceState {
    today: Slice<Vec<AttendanceEvent>>,
    history: Slice<Vec<AttendanceEvent>>,
    status: Slice<Option<CurrentStatus>>,
    summary: Slice<Option<Summary>>,
    last_error: Option<String>,
}

impl AttendanceState {
    fn error_mut(&mut self, slice: DataSlice) -> &mut Option<String> {
        match slice {
            DataSlice::Today => &mut self.today.error,
            DataSlice::History => &mut self.history.error,
            DataSlice::Status => &mut self.status.error,
            DataSlice::Summary => &mut self.summary.error,
        }
    }
}

struct Inner {
    api: Arc<dyn AttendanceApi>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<AttendanceState>,
    in_flight: AtomicUsize,
    background: Mutex<Vec<JoinHandle<()>>>,
}

/// Marks one operation as in flight for as long as it lives.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct AttendanceStore {
    inner: Arc<Inner>,
}

impl AttendanceStore {
    pub fn new(api: Arc<dyn AttendanceApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                notifier,
                state: Mutex::new(AttendanceState::default()),
                in_flight: AtomicUsize::new(0),
                background: Mutex::new(Vec::new()),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, AttendanceState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn loading(&self) -> LoadingGuard<'_> {
        LoadingGuard::enter(&self.inner.in_flight)
    }

    fn record_failure(&self, slice: Option<DataSlice>, err: &AppError, fallback: &str) -> String {
        let message = err.message_or(fallback);
        warn!(?slice, error = %err, "{fallback}");

        let mut st = self.state();
        if let Some(s) = slice {
            *st.error_mut(s) = Some(message.clone());
        }
        st.last_error = Some(message.clone());
        message
    }

    fn clear_error(&self, slice: DataSlice) {
        *self.state().error_mut(slice) = None;
    }

    // ---------------------------
    // Snapshots
    // ---------------------------

    pub fn today(&self) -> Vec<AttendanceEvent> {
        self.state().today.value.clone()
    }

    pub fn history(&self) -> Vec<AttendanceEvent> {
        self.state().history.value.clone()
    }

    /// `None` until the status has been fetched once.
    pub fn status(&self) -> Option<CurrentStatus> {
        self.state().status.value
    }

    pub fn summary(&self) -> Option<Summary> {
        self.state().summary.value.clone()
    }

    /// Most recent failure of any operation.
    pub fn error(&self) -> Option<String> {
        self.state().last_error.clone()
    }

    pub fn error_of(&self, slice: DataSlice) -> Option<String> {
        self.state().error_mut(slice).clone()
    }

    /// True while at least one operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.inner.in_flight.load(Ordering::SeqCst) > 0
    }

    // ---------------------------
    // Fetches
    // ---------------------------

    pub async fn fetch_today(&self) -> Option<Vec<AttendanceEvent>> {
        let _loading = self.loading();
        self.clear_error(DataSlice::Today);

        match self.inner.api.today().await {
            Ok(body) => {
                let events = normalize::events(&body);
                debug!(count = events.len(), "today's attendance fetched");
                self.state().today.value = events.clone();
                Some(events)
            }
            Err(e) => {
                self.record_failure(
                    Some(DataSlice::Today),
                    &e,
                    "Failed to fetch today attendance",
                );
                None
            }
        }
    }

    pub async fn fetch_history(&self, filter: &HistoryFilter) -> Option<Vec<AttendanceEvent>> {
        let _loading = self.loading();
        self.clear_error(DataSlice::History);

        match self.inner.api.history(filter).await {
            Ok(body) => {
                let events = normalize::events(&body);
                debug!(count = events.len(), "attendance history fetched");
                self.state().history.value = events.clone();
                Some(events)
            }
            Err(e) => {
                self.record_failure(
                    Some(DataSlice::History),
                    &e,
                    "Failed to fetch attendance history",
                );
                None
            }
        }
    }

    pub async fn fetch_status(&self) -> Option<CurrentStatus> {
        let _loading = self.loading();
        self.clear_error(DataSlice::Status);

        match self.inner.api.status().await {
            Ok(body) => {
                let status = normalize::status(&body);
                self.state().status.value = Some(status);
                Some(status)
            }
            Err(e) => {
                self.record_failure(
                    Some(DataSlice::Status),
                    &e,
                    "Failed to fetch current status",
                );
                None
            }
        }
    }

    pub async fn fetch_summary(&self, month: &str) -> Option<Summary> {
        let _loading = self.loading();
        self.clear_error(DataSlice::Summary);

        match self.inner.api.summary(month).await {
            Ok(data) => {
                let summary = Summary {
                    month: month.to_string(),
                    data,
                };
                self.state().summary.value = Some(summary.clone());
                Some(summary)
            }
            Err(e) => {
                self.record_failure(Some(DataSlice::Summary), &e, "Failed to fetch summary");
                None
            }
        }
    }

    /// Today, status and history side by side. Completion order does not
    /// matter: each fetch only touches its own slice.
    pub async fn refresh_all(&self) {
        let history_filter = HistoryFilter::default();
        tokio::join!(
            self.fetch_today(),
            self.fetch_status(),
            self.fetch_history(&history_filter),
        );
    }

    pub async fn export(&self, filter: &HistoryFilter) -> AppResult<Vec<u8>> {
        let _loading = self.loading();
        self.inner.api.export(filter).await.inspect_err(|e| {
            self.record_failure(None, e, "Failed to export attendance");
        })
    }

    // ---------------------------
    // Mutations
    // ---------------------------

    /// Never fails: transport and server errors come back as `valid: false`.
    pub async fn validate_qr(&self, qr_data: &str, scan_time: Option<String>) -> QrValidation {
        let _loading = self.loading();
        let request = ValidateQrRequest {
            qr_data: qr_data.to_string(),
            scan_time,
        };

        match self.inner.api.validate_qr(&request).await {
            Ok(result) => {
                if result.valid {
                    self.inner.notifier.success("QR Code verified successfully!");
                } else {
                    self.inner
                        .notifier
                        .error(result.message.as_deref().unwrap_or("Invalid QR Code"));
                }
                result
            }
            Err(e) => {
                let message = self.record_failure(None, &e, "QR validation failed");
                self.inner.notifier.error(&message);
                QrValidation::rejected(message)
            }
        }
    }

    /// Never fails: transport and server errors come back as `success: false`.
    ///
    /// On success, today's events and the status are refreshed by two
    /// background tasks that are not awaited here.
    pub async fn submit_attendance(&self, request: &AttendanceRequest) -> SubmitOutcome {
        let _loading = self.loading();

        match self.inner.api.record(request).await {
            Ok(outcome) => {
                if outcome.success {
                    self.inner.notifier.success(
                        outcome
                            .message
                            .as_deref()
                            .unwrap_or("Attendance recorded successfully!"),
                    );
                    self.spawn_refresh();
                } else {
                    self.inner.notifier.error(
                        outcome
                            .message
                            .as_deref()
                            .unwrap_or("Failed to record attendance"),
                    );
                }
                outcome
            }
            Err(e) => {
                let message = self.record_failure(None, &e, "Failed to record attendance");
                self.inner.notifier.error(&message);
                SubmitOutcome::failed(message)
            }
        }
    }

    fn spawn_refresh(&self) {
        let today_store = self.clone();
        let today = tokio::spawn(async move {
            today_store.fetch_today().await;
        });

        let status_store = self.clone();
        let status = tokio::spawn(async move {
            status_store.fetch_status().await;
        });

        let mut handles = self
            .inner
            .background
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        handles.retain(|h| !h.is_finished());
        handles.extend([today, status]);
    }

    /// Background refresh tasks still tracked by the store.
    pub fn background_tasks(&self) -> usize {
        self.inner
            .background
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Wait for background refreshes spawned so far. Only needed by callers
    /// that are about to shut the runtime down.
    pub async fn settle_background(&self) {
        let handles: Vec<JoinHandle<()>> = std::mem::take(
            &mut *self
                .inner
                .background
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        );

        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "background refresh task failed");
            }
        }
    }
}
