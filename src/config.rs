//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `TRENDBOARD_*` environment overrides.

use crate::api::ClientConfig;
use crate::presenter::TimerSettings;
use crate::sync::RefreshWait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Content service connection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ServerConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs * 1000,
        }
    }
}

/// How a refresh waits for background collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshWaitStrategy {
    PollUntilChanged,
    Fixed,
}

/// Refresh and timer settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    #[serde(default = "default_auto_refresh")]
    pub auto_refresh_minutes: u64,

    #[serde(default = "default_status_check")]
    pub status_check_minutes: u64,

    #[serde(default = "default_refresh_wait")]
    pub refresh_wait: RefreshWaitStrategy,

    /// Delay used by the `fixed` strategy
    #[serde(default = "default_settle")]
    pub settle_ms: u64,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_max_wait")]
    pub max_wait_ms: u64,
}

fn default_auto_refresh() -> u64 {
    15
}

fn default_status_check() -> u64 {
    5
}

fn default_refresh_wait() -> RefreshWaitStrategy {
    RefreshWaitStrategy::PollUntilChanged
}

fn default_settle() -> u64 {
    2500
}

fn default_poll_interval() -> u64 {
    1000
}

fn default_max_wait() -> u64 {
    15_000
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            auto_refresh_minutes: default_auto_refresh(),
            status_check_minutes: default_status_check(),
            refresh_wait: default_refresh_wait(),
            settle_ms: default_settle(),
            poll_interval_ms: default_poll_interval(),
            max_wait_ms: default_max_wait(),
        }
    }
}

impl SyncConfig {
    pub fn refresh_wait(&self) -> RefreshWait {
        match self.refresh_wait {
            RefreshWaitStrategy::Fixed => RefreshWait::Fixed(Duration::from_millis(self.settle_ms)),
            RefreshWaitStrategy::PollUntilChanged => RefreshWait::PollUntilChanged {
                interval: Duration::from_millis(self.poll_interval_ms),
                timeout: Duration::from_millis(self.max_wait_ms),
            },
        }
    }

    /// Timer periods; zero minutes is clamped to one
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            auto_refresh: Duration::from_secs(self.auto_refresh_minutes.max(1) * 60),
            status_check: Duration::from_secs(self.status_check_minutes.max(1) * 60),
        }
    }
}

/// Local state location
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("trendboard").to_string_lossy().to_string())
        .unwrap_or_else(|| "./trendboard_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_dismiss_after")]
    pub dismiss_after_ms: u64,
}

fn default_dismiss_after() -> u64 {
    3000
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: default_dismiss_after(),
        }
    }
}

impl NotificationsConfig {
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from an explicit path, else the default locations, else the
    /// environment
    ///
    /// An explicit path that fails to load is an error; a broken file in a
    /// default location is skipped with a warning.
    pub fn load_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            let config = Self::load_with_env(path)?;
            tracing::info!("Loaded config from {:?}", path);
            return Ok(config);
        }

        let config_paths = [
            dirs::config_dir().map(|p| p.join("trendboard").join("config.toml")),
            Some(PathBuf::from("./trendboard.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Ok(Self::from_env())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("TRENDBOARD_API_URL") {
            self.server.base_url = url;
        }

        if let Some(data_dir) = lookup("TRENDBOARD_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Some(minutes) = lookup("TRENDBOARD_AUTO_REFRESH_MINUTES") {
            match minutes.parse() {
                Ok(m) => self.sync.auto_refresh_minutes = m,
                Err(_) => tracing::warn!(value = %minutes, "Ignoring invalid TRENDBOARD_AUTO_REFRESH_MINUTES"),
            }
        }

        if let Some(level) = lookup("TRENDBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("TRENDBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Data directory with a leading `~` expanded to the home directory
    pub fn data_dir(&self) -> PathBuf {
        expand_home(&self.storage.data_dir, dirs::home_dir())
    }
}

fn expand_home(path: &str, home: Option<PathBuf>) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return PathBuf::from(path),
    };

    match home {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => {
            tracing::warn!(path, "No home directory, using data_dir as written");
            PathBuf::from(path)
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
///
/// `data_dir` is written out resolved for this machine.
pub fn generate_default_config() -> String {
    let data_dir = toml::Value::String(default_data_dir());

    format!(
        r#"# Trendboard Configuration
#
# Environment variables override these settings:
# - TRENDBOARD_API_URL
# - TRENDBOARD_DATA_DIR
# - TRENDBOARD_AUTO_REFRESH_MINUTES
# - TRENDBOARD_LOG_LEVEL
# - TRENDBOARD_LOG_FORMAT

[server]
# Content service base URL
base_url = "http://127.0.0.1:5000"

# Request timeout in seconds
request_timeout_secs = 30

[sync]
# Force a refresh of the current view every N minutes
auto_refresh_minutes = 15

# Log service status every N minutes
status_check_minutes = 5

# How a refresh waits for collection: poll_until_changed or fixed
refresh_wait = "poll_until_changed"

# Delay before reading back (fixed)
settle_ms = 2500

# Re-read interval and upper bound (poll_until_changed)
poll_interval_ms = 1000
max_wait_ms = 15000

[storage]
# Directory holding local_storage.json (theme, tracked keywords)
data_dir = {data_dir}

[notifications]
# Auto-dismiss notifications after this many milliseconds
dismiss_after_ms = 3000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.sync.auto_refresh_minutes, 15);
        assert_eq!(config.notifications.dismiss_after(), Duration::from_millis(3000));
        assert_eq!(config.sync.refresh_wait(), RefreshWait::default());
        assert_eq!(config.server.client_config().request_timeout_ms, 30_000);
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.sync.refresh_wait, RefreshWaitStrategy::PollUntilChanged);
        assert_eq!(config.sync.status_check_minutes, 5);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_data_dir_is_resolved() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.storage.data_dir, default_data_dir());
        assert!(!config.storage.data_dir.starts_with('~'));
    }

    #[test]
    fn test_expand_home() {
        let home = Some(PathBuf::from("/home/mina"));
        assert_eq!(
            expand_home("~/.local/share/trendboard", home.clone()),
            PathBuf::from("/home/mina/.local/share/trendboard")
        );
        assert_eq!(expand_home("~", home.clone()), PathBuf::from("/home/mina"));
        assert_eq!(expand_home("~other/data", home.clone()), PathBuf::from("~other/data"));
        assert_eq!(expand_home("/var/lib/trendboard", home), PathBuf::from("/var/lib/trendboard"));
        assert_eq!(expand_home("~/data", None), PathBuf::from("~/data"));
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trendboard.toml");
        std::fs::write(
            &path,
            "[sync]\nrefresh_wait = \"fixed\"\nsettle_ms = 500\n\n[server]\nbase_url = \"http://10.0.0.2:5000\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.base_url, "http://10.0.0.2:5000");
        assert_eq!(config.sync.refresh_wait(), RefreshWait::Fixed(Duration::from_millis(500)));
        assert_eq!(config.sync.auto_refresh_minutes, 15);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[sync\nauto_refresh_minutes = ").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse { .. })));
        assert!(Config::load_default(Some(broken.as_path())).is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("TRENDBOARD_API_URL", "http://example.test:9000"),
            ("TRENDBOARD_AUTO_REFRESH_MINUTES", "30"),
            ("TRENDBOARD_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.server.base_url, "http://example.test:9000");
        assert_eq!(config.sync.auto_refresh_minutes, 30);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|name| {
            (name == "TRENDBOARD_AUTO_REFRESH_MINUTES").then(|| "soon".to_string())
        });
        assert_eq!(config.sync.auto_refresh_minutes, 15);
    }

    #[test]
    fn test_timer_settings_clamped() {
        let sync = SyncConfig {
            auto_refresh_minutes: 0,
            ..Default::default()
        };
        let timers = sync.timer_settings();
        assert_eq!(timers.auto_refresh, Duration::from_secs(60));
        assert_eq!(timers.status_check, Duration::from_secs(300));
    }
}
