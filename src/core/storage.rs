//! Persistent key/value slots for the session: `token` and `user`.

use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Raw persisted session. The user profile is kept as serialized JSON text.
///
/// Either field may be missing on disk (hand edits, older versions); the
/// session store decides what a partial record means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

pub trait SessionStorage: Send + Sync {
    fn load(&self) -> AppResult<StoredSession>;

    /// Replace both slots in one write.
    fn save(&self, stored: &StoredSession) -> AppResult<()>;

    fn clear(&self) -> AppResult<()>;
}

/// JSON file storage. Writes go through a temp file and a rename so the two
/// slots never end up half-written.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> AppResult<StoredSession> {
        if !self.path.exists() {
            return Ok(StoredSession::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(StoredSession::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, stored: &StoredSession) -> AppResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(stored)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-process storage, for tests and embedding.
#[derive(Default)]
pub struct MemorySessionStorage {
    inner: Mutex<StoredSession>,
}

impl MemorySessionStorage {
    pub fn new(initial: StoredSession) -> Self {
        Self {
            inner: Mutex::new(initial),
        }
    }

    fn guard(&self) -> MutexGuard<'_, StoredSession> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> StoredSession {
        self.guard().clone()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> AppResult<StoredSession> {
        Ok(self.snapshot())
    }

    fn save(&self, stored: &StoredSession) -> AppResult<()> {
        *self.guard() = stored.clone();
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        *self.guard() = StoredSession::default();
        Ok(())
    }
}
