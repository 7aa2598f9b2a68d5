use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Overrides `api_base_url` from the config file.
pub const API_URL_ENV: &str = "RATTENDANCE_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_session_file")]
    pub session_file: String,
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub test_mode: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api".to_string()
}
fn default_session_file() -> String {
    Config::config_dir()
        .join("session.json")
        .to_string_lossy()
        .to_string()
}
fn default_redirect_delay_ms() -> u64 {
    2000
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            session_file: default_session_file(),
            redirect_delay_ms: default_redirect_delay_ms(),
            request_timeout_secs: None,
            test_mode: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.rattendance`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rattendance")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Load configuration from file, or return defaults if not found.
    /// `RATTENDANCE_API_URL` wins over the file.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Config::default()
            } else {
                serde_yaml::from_str(&content).map_err(|e| {
                    AppError::Config(format!("cannot parse {}: {e}", path.display()))
                })?
            }
        } else {
            Config::default()
        };

        if let Ok(url) = env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            cfg.api_base_url = url.trim().to_string();
        }

        Ok(cfg)
    }

    /// Write this configuration to the standard config file.
    pub fn save(&self) -> AppResult<PathBuf> {
        fs::create_dir_all(Self::config_dir())?;
        let path = Self::config_file();
        fs::write(&path, serde_yaml::to_string(self)?)?;
        Ok(path)
    }

    /// Create the config directory and a default config file.
    /// An existing file is left untouched.
    pub fn init_all(api_base_url: Option<&str>) -> AppResult<(PathBuf, bool)> {
        let path = Self::config_file();
        if path.exists() {
            return Ok((path, false));
        }

        let mut cfg = Config::default();
        if let Some(url) = api_base_url {
            cfg.api_base_url = url.to_string();
        }
        Ok((cfg.save()?, true))
    }

    pub fn session_path(&self) -> PathBuf {
        expand_tilde(&self.session_file)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
    }
}
