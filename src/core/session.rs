//! Session store: who is logged in, with which token.

use super::ports::Notifier;
use super::storage::{SessionStorage, StoredSession};
use crate::api::{AuthApi, AuthResponse, normalize};
use crate::errors::{AppError, AppResult};
use crate::models::session::{Credentials, RegisterProfile, Session, User};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    storage: Arc<dyn SessionStorage>,
    notifier: Arc<dyn Notifier>,
    session: Option<Session>,
}

impl SessionStore {
    pub fn new(
        api: Arc<dyn AuthApi>,
        storage: Arc<dyn SessionStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            storage,
            notifier,
            session: None,
        }
    }

    /// Build the store and restore any persisted session before returning,
    /// so callers can guard routes right away.
    pub fn open(
        api: Arc<dyn AuthApi>,
        storage: Arc<dyn SessionStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let mut store = Self::new(api, storage, notifier);
        store.restore();
        store
    }

    /// Load the persisted session. A record with only one of token/user is
    /// treated as no session at all.
    pub fn restore(&mut self) -> Option<&Session> {
        let stored = match self.storage.load() {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "unreadable session storage, starting logged out");
                StoredSession::default()
            }
        };

        self.session = match (stored.token, stored.user) {
            (Some(token), Some(user_json)) if !token.is_empty() => {
                match serde_json::from_str::<User>(&user_json) {
                    Ok(user) => Some(Session::new(token, user)),
                    Err(e) => {
                        warn!(error = %e, "stored user profile is not readable");
                        None
                    }
                }
            }
            _ => None,
        };

        self.session.as_ref()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub async fn login(&mut self, credentials: &Credentials) -> AppResult<Session> {
        let result = self.api.login(credentials).await;
        self.establish(result, "Login successful!", "Login failed!")
    }

    pub async fn register(&mut self, profile: &RegisterProfile) -> AppResult<Session> {
        let result = self.api.register(profile).await;
        self.establish(result, "Registration successful!", "Registration failed!")
    }

    fn establish(
        &mut self,
        result: AppResult<AuthResponse>,
        ok_msg: &str,
        fail_msg: &str,
    ) -> AppResult<Session> {
        let response = match result {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "auth request failed");
                let message = e.server_message().unwrap_or(fail_msg).to_string();
                self.notifier.error(&message);
                return Err(AppError::Auth(message));
            }
        };

        let (token, user) = match (response.access_token, response.user) {
            (Some(t), Some(u)) if !t.is_empty() => (t, u),
            _ => {
                let message = response
                    .message
                    .unwrap_or_else(|| format!("{fail_msg} The server sent no token."));
                self.notifier.error(&message);
                return Err(AppError::Auth(message));
            }
        };

        let stored = StoredSession {
            token: Some(token.clone()),
            user: Some(serde_json::to_string(&user)?),
        };
        if let Err(e) = self.storage.save(&stored) {
            self.notifier.error(&format!("Could not save session: {e}"));
            return Err(e);
        }

        let session = Session::new(token, user);
        self.session = Some(session.clone());
        self.notifier
            .success(response.message.as_deref().unwrap_or(ok_msg));
        Ok(session)
    }

    /// Invalidate the session on the server, then forget it locally.
    ///
    /// Local state is kept when the server call fails; use
    /// [`SessionStore::clear_local`] to drop it explicitly.
    pub async fn logout(&mut self) -> AppResult<()> {
        let Some(token) = self.token().map(str::to_string) else {
            self.notifier.info("Not logged in.");
            return Ok(());
        };

        match self.api.logout(&token).await {
            Ok(()) => {
                self.clear_local()?;
                self.notifier.success("Logout successful!");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "remote logout failed, local session kept");
                self.notifier.error("Logout failed!");
                Err(e)
            }
        }
    }

    pub fn clear_local(&mut self) -> AppResult<()> {
        self.storage.clear()?;
        self.session = None;
        Ok(())
    }

    /// Re-read the profile from `/me`. A 401 ends the local session.
    pub async fn refresh_profile(&mut self) -> AppResult<User> {
        let token = self
            .token()
            .map(str::to_string)
            .ok_or_else(|| AppError::Auth("Not logged in".into()))?;

        let body = match self.api.me(&token).await {
            Ok(b) => b,
            Err(e) if e.is_unauthorized() => {
                self.clear_local()?;
                let message = "Session expired, please log in again.";
                self.notifier.error(message);
                return Err(AppError::Auth(message.into()));
            }
            Err(e) => {
                self.notifier
                    .error(&e.message_or("Failed to load profile"));
                return Err(e);
            }
        };

        let user = normalize::profile(body)?;
        self.storage.save(&StoredSession {
            token: Some(token.clone()),
            user: Some(serde_json::to_string(&user)?),
        })?;
        self.session = Some(Session::new(token, user.clone()));
        Ok(user)
    }
}
