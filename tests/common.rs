#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use async_trait::async_trait;
use rattendance::api::{
    AttendanceApi, AttendanceRequest, AuthApi, AuthResponse, GeneratedQr, HistoryFilter,
    QrValidation, SubmitOutcome, ValidateQrRequest,
};
use rattendance::core::ports::{Camera, CameraError, CameraSession, Frame, Navigator, Notifier};
use rattendance::core::routes::Route;
use rattendance::errors::{AppError, AppResult};
use rattendance::models::session::{Credentials, RegisterProfile, User};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn rat() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// CLI command isolated in `home`: own config dir, own session file,
/// unreachable API and no log noise.
pub fn rat_in(home: &Path) -> Command {
    let mut cmd = rat();
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env_remove("RATTENDANCE_API_URL")
        .env("RATTENDANCE_LOG", "off")
        .args(["--api", "http://127.0.0.1:9/api"]);
    cmd
}

pub fn user(id: i64, name: &str, email: &str) -> User {
    serde_json::from_value(json!({ "id": id, "name": name, "email": email }))
        .expect("valid user")
}

//=========================================================================================
// Scripted API
//=========================================================================================

/// Scripted answer of one endpoint.
#[derive(Clone, Debug)]
pub enum Reply<T> {
    Ok(T),
    Remote(u16, Option<&'static str>),
    Transport(&'static str),
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> AppResult<T> {
        match self {
            Reply::Ok(v) => Ok(v.clone()),
            Reply::Remote(status, message) => Err(AppError::Remote {
                status: *status,
                message: message.map(str::to_string),
            }),
            Reply::Transport(m) => Err(AppError::Transport(m.to_string())),
        }
    }
}

pub struct FakeApi {
    pub login: Mutex<Reply<AuthResponse>>,
    pub register: Mutex<Reply<AuthResponse>>,
    pub logout: Mutex<Reply<()>>,
    pub me: Mutex<Reply<Value>>,
    pub today: Mutex<Reply<Value>>,
    pub history: Mutex<Reply<Value>>,
    pub status: Mutex<Reply<Value>>,
    pub summary: Mutex<Reply<Value>>,
    pub validate: Mutex<Reply<QrValidation>>,
    pub record: Mutex<Reply<SubmitOutcome>>,
    pub generate: Mutex<Reply<GeneratedQr>>,
    pub locations: Mutex<Reply<Value>>,
    pub export: Mutex<Reply<Vec<u8>>>,
    delays: Mutex<HashMap<&'static str, Duration>>,
    calls: Mutex<Vec<&'static str>>,
    pub last_record: Mutex<Option<AttendanceRequest>>,
    pub last_validate: Mutex<Option<ValidateQrRequest>>,
    pub last_filter: Mutex<Option<HistoryFilter>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            login: Mutex::new(Reply::Remote(401, Some("Invalid credentials"))),
            register: Mutex::new(Reply::Remote(422, None)),
            logout: Mutex::new(Reply::Ok(())),
            me: Mutex::new(Reply::Ok(json!({}))),
            today: Mutex::new(Reply::Ok(json!({ "activities": [] }))),
            history: Mutex::new(Reply::Ok(json!({ "data": [] }))),
            status: Mutex::new(Reply::Ok(json!({ "status": "clocked_out" }))),
            summary: Mutex::new(Reply::Ok(json!({}))),
            validate: Mutex::new(Reply::Ok(QrValidation::default())),
            record: Mutex::new(Reply::Ok(SubmitOutcome::default())),
            generate: Mutex::new(Reply::Transport("offline")),
            locations: Mutex::new(Reply::Ok(json!({ "data": [] }))),
            export: Mutex::new(Reply::Ok(Vec::new())),
            delays: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            last_record: Mutex::new(None),
            last_validate: Mutex::new(None),
            last_filter: Mutex::new(None),
        }
    }
}

pub fn set<T>(slot: &Mutex<Reply<T>>, reply: Reply<T>) {
    *slot.lock().unwrap() = reply;
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn delay(&self, endpoint: &'static str, d: Duration) {
        self.delays.lock().unwrap().insert(endpoint, d);
    }

    pub fn count(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == endpoint)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn hit<T: Clone>(&self, endpoint: &'static str, slot: &Mutex<Reply<T>>) -> AppResult<T> {
        self.calls.lock().unwrap().push(endpoint);
        let delay = self.delays.lock().unwrap().get(endpoint).copied();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
        let reply = slot.lock().unwrap().clone();
        reply.get()
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn login(&self, _: &Credentials) -> AppResult<AuthResponse> {
        self.hit("login", &self.login).await
    }

    async fn register(&self, _: &RegisterProfile) -> AppResult<AuthResponse> {
        self.hit("register", &self.register).await
    }

    async fn logout(&self, _: &str) -> AppResult<()> {
        self.hit("logout", &self.logout).await
    }

    async fn me(&self, _: &str) -> AppResult<Value> {
        self.hit("me", &self.me).await
    }
}

#[async_trait]
impl AttendanceApi for FakeApi {
    async fn today(&self) -> AppResult<Value> {
        self.hit("today", &self.today).await
    }

    async fn history(&self, filter: &HistoryFilter) -> AppResult<Value> {
        *self.last_filter.lock().unwrap() = Some(filter.clone());
        self.hit("history", &self.history).await
    }

    async fn status(&self) -> AppResult<Value> {
        self.hit("status", &self.status).await
    }

    async fn summary(&self, _: &str) -> AppResult<Value> {
        self.hit("summary", &self.summary).await
    }

    async fn validate_qr(&self, request: &ValidateQrRequest) -> AppResult<QrValidation> {
        *self.last_validate.lock().unwrap() = Some(request.clone());
        self.hit("validate", &self.validate).await
    }

    async fn record(&self, request: &AttendanceRequest) -> AppResult<SubmitOutcome> {
        *self.last_record.lock().unwrap() = Some(request.clone());
        self.hit("record", &self.record).await
    }

    async fn generate_qr(&self, _: &str) -> AppResult<GeneratedQr> {
        self.hit("generate", &self.generate).await
    }

    async fn locations(&self) -> AppResult<Value> {
        self.hit("locations", &self.locations).await
    }

    async fn export(&self, filter: &HistoryFilter) -> AppResult<Vec<u8>> {
        *self.last_filter.lock().unwrap() = Some(filter.clone());
        self.hit("export", &self.export).await
    }
}

//=========================================================================================
// Host capabilities
//=========================================================================================

/// Camera replaying scripted frames. `open` counts sessions not yet stopped.
pub struct FakeCamera {
    frames: Mutex<VecDeque<Frame>>,
    fail: Option<CameraError>,
    hang: bool,
    pub open: Arc<AtomicUsize>,
    pub starts: AtomicUsize,
}

impl FakeCamera {
    pub fn with_frames(frames: Vec<Frame>) -> Arc<Self> {
        Arc::new(Self {
            frames: Mutex::new(frames.into()),
            fail: None,
            hang: false,
            open: Arc::new(AtomicUsize::new(0)),
            starts: AtomicUsize::new(0),
        })
    }

    /// Opens fine but never sees a code.
    pub fn hanging() -> Arc<Self> {
        Arc::new(Self {
            frames: Mutex::new(VecDeque::new()),
            fail: None,
            hang: true,
            open: Arc::new(AtomicUsize::new(0)),
            starts: AtomicUsize::new(0),
        })
    }

    pub fn decoding(text: &str) -> Arc<Self> {
        Self::with_frames(vec![Frame::Miss, Frame::Decoded(text.to_string())])
    }

    pub fn failing(err: CameraError) -> Arc<Self> {
        Arc::new(Self {
            frames: Mutex::new(VecDeque::new()),
            fail: Some(err),
            hang: false,
            open: Arc::new(AtomicUsize::new(0)),
            starts: AtomicUsize::new(0),
        })
    }

    pub fn open_sessions(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Camera for FakeCamera {
    async fn start(&self) -> Result<Box<dyn CameraSession>, CameraError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = &self.fail {
            return Err(e.clone());
        }
        self.open.fetch_add(1, Ordering::SeqCst);
        let frames = std::mem::take(&mut *self.frames.lock().unwrap());
        Ok(Box::new(FakeSession {
            frames,
            hang: self.hang,
            open: Arc::clone(&self.open),
            stopped: false,
        }))
    }
}

struct FakeSession {
    frames: VecDeque<Frame>,
    hang: bool,
    open: Arc<AtomicUsize>,
    stopped: bool,
}

#[async_trait]
impl CameraSession for FakeSession {
    async fn next_frame(&mut self) -> Frame {
        match self.frames.pop_front() {
            Some(f) => f,
            None if self.hang => std::future::pending().await,
            None => Frame::Closed,
        }
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.open.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Note {
    Info(String),
    Success(String),
    Error(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notes: Mutex<Vec<Note>>,
}

impl RecordingNotifier {
    pub fn notes(&self) -> Vec<Note> {
        self.notes.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notes()
            .into_iter()
            .filter_map(|n| match n {
                Note::Error(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.notes()
            .into_iter()
            .filter_map(|n| match n {
                Note::Success(m) => Some(m),
                _ => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, msg: &str) {
        self.notes.lock().unwrap().push(Note::Info(msg.to_string()));
    }

    fn success(&self, msg: &str) {
        self.notes.lock().unwrap().push(Note::Success(msg.to_string()));
    }

    fn error(&self, msg: &str) {
        self.notes.lock().unwrap().push(Note::Error(msg.to_string()));
    }
}
