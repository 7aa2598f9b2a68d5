//! Wiring shared by the commands that talk to the server.
//!
//! Construction order: config, session store (restored from disk right
//! away), then the attendance API carrying the session token.

use crate::api::{AttendanceApi, HttpApi};
use crate::config::Config;
use crate::core::attendance::AttendanceStore;
use crate::core::routes::{Route, guard};
use crate::core::session::SessionStore;
use crate::core::storage::FileSessionStorage;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{ConsoleNotifier, info};
use std::sync::Arc;
use tracing::debug;

pub struct AppContext {
    pub cfg: Config,
    pub test_mode: bool,
    pub notifier: Arc<ConsoleNotifier>,
    pub session: SessionStore,
    api: HttpApi,
}

impl AppContext {
    pub fn open(cfg: &Config, test_mode: bool) -> AppResult<Self> {
        let api = HttpApi::new(&cfg.api_base_url, cfg.request_timeout())?;
        let notifier = Arc::new(ConsoleNotifier);
        let storage = Arc::new(FileSessionStorage::new(cfg.session_path()));

        let session = SessionStore::open(Arc::new(api.clone()), storage, notifier.clone());
        debug!(
            authenticated = session.is_authenticated(),
            api = api.base_url(),
            "session restored"
        );

        Ok(Self {
            cfg: cfg.clone(),
            test_mode,
            notifier,
            session,
            api,
        })
    }

    /// Apply the session guard for `route`.
    ///
    /// `Ok(true)` when the command may run. A guest-only command with a live
    /// session is skipped with a notice; a protected command without one is
    /// an error.
    pub fn enter(&self, route: Route) -> AppResult<bool> {
        let landed = guard(route, self.session.is_authenticated());
        if landed == route {
            return Ok(true);
        }
        debug!(requested = %route, landed = %landed, "route guarded");

        match landed {
            Route::Login => Err(AppError::Auth(
                "Not logged in. Run `rattendance login` first.".into(),
            )),
            _ => {
                let who = self
                    .session
                    .user()
                    .map(|u| u.email.clone())
                    .unwrap_or_default();
                info(format!(
                    "Already logged in as {who}. Run `rattendance logout` first."
                ));
                Ok(false)
            }
        }
    }

    /// Attendance endpoints with the current bearer token.
    pub fn attendance_api(&self) -> AppResult<Arc<dyn AttendanceApi>> {
        let token = self
            .session
            .token()
            .ok_or_else(|| AppError::Auth("Not logged in".into()))?;
        Ok(Arc::new(self.api.clone().with_token(token)))
    }

    pub fn attendance_store(&self) -> AppResult<AttendanceStore> {
        Ok(AttendanceStore::new(
            self.attendance_api()?,
            self.notifier.clone(),
        ))
    }
}
