//! Configuration for BuildingHub.
//!
//! Locates the state directory and reads the backend settings from the
//! environment.
//!
//! # Storage Structure
//!
//! ```text
//! ~/.buildinghub/
//! ├── logs/         # Application logs (TUI mode)
//! └── .env.local    # Local overrides for the variables below
//! ```
//!
//! # Environment Variables
//!
//! - `BUILDINGHUB_STATE_DIR`: Override the base state directory
//! - `BUILDINGHUB_LOG_DIR`: Override the log directory
//! - `BUILDINGHUB_API_URL`: Backend base URL
//! - `BUILDINGHUB_TIMEOUT_SECS`: Request timeout in seconds

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;
use url::Url;

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "BUILDINGHUB_STATE_DIR";

/// Environment variable for custom log directory.
pub const LOG_DIR_ENV: &str = "BUILDINGHUB_LOG_DIR";

/// Environment variable for the backend base URL.
pub const API_URL_ENV: &str = "BUILDINGHUB_API_URL";

/// Environment variable for the request timeout.
pub const TIMEOUT_ENV: &str = "BUILDINGHUB_TIMEOUT_SECS";

/// Backend used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8081";

/// Request timeout used when nothing is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_STATE_DIR: &str = ".buildinghub";
const LOGS_SUBDIR: &str = "logs";
const ENV_FILE: &str = ".env.local";

/// Log file written in TUI mode.
pub const LOG_FILE: &str = "buildinghub.log";

static STATE_DIR_CACHE: OnceLock<PathBuf> = OnceLock::new();

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API URL '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("API URL must use http or https: {0}")]
    UnsupportedScheme(String),

    #[error("invalid timeout '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Get the BuildingHub state directory.
///
/// The state directory is determined by:
/// 1. `BUILDINGHUB_STATE_DIR` environment variable if set
/// 2. `~/.buildinghub` if home directory is available
/// 3. `.buildinghub` in current directory as fallback
pub fn state_dir() -> PathBuf {
    STATE_DIR_CACHE
        .get_or_init(|| {
            std::env::var(STATE_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    dirs::home_dir()
                        .map(|h| h.join(DEFAULT_STATE_DIR))
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
                })
        })
        .clone()
}

/// Path of the `.env.local` file inside a state directory.
pub fn env_file(state_dir: &Path) -> PathBuf {
    state_dir.join(ENV_FILE)
}

/// Load `.env.local` from the state directory, then from the working
/// directory. Variables already set in the environment win.
pub fn load_env_files() {
    let env_path = env_file(&state_dir());
    if env_path.exists() {
        let _ = dotenvy::from_path(&env_path);
    }
    let _ = dotenvy::from_filename(ENV_FILE);
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: Url,
    pub timeout: Duration,
    pub state_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let state_dir = lookup(STATE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(state_dir);
        let logs_dir = lookup(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| state_dir.join(LOGS_SUBDIR));
        let api_url = parse_api_url(lookup(API_URL_ENV).as_deref().unwrap_or(DEFAULT_API_URL))?;
        let timeout = match lookup(TIMEOUT_ENV) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT,
        };

        debug!(api_url = %api_url, timeout_secs = timeout.as_secs(), "Settings loaded");
        Ok(Self {
            api_url,
            timeout,
            state_dir,
            logs_dir,
        })
    }

    /// Replace the backend URL.
    pub fn with_api_url(mut self, raw: &str) -> Result<Self> {
        self.api_url = parse_api_url(raw)?;
        Ok(self)
    }

    /// Replace the state directory. A log directory derived from the old
    /// state directory follows it; an explicitly configured one is kept.
    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let derived = self.logs_dir == self.state_dir.join(LOGS_SUBDIR);
        self.state_dir = dir.into();
        if derived {
            self.logs_dir = self.state_dir.join(LOGS_SUBDIR);
        }
        self
    }

    /// Path of the TUI log file.
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir.join(LOG_FILE)
    }

    /// Create the state and log directories.
    ///
    /// # Errors
    /// Returns an error if a directory cannot be created.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.state_dir)?;
        std::fs::create_dir_all(&self.logs_dir)?;
        Ok(())
    }
}

/// Parse a backend base URL. Only http and https are accepted.
pub fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
        value: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme(raw.to_string())),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
