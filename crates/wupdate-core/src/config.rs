//! Persistent configuration for wupdate.
//!
//! Stores user settings in `~/.wupdate/config.json`. The directory can be
//! relocated with the `WUPDATE_HOME` environment variable, which is mostly
//! useful for tests and portable installs.
//!
//! # Example
//!
//! ```no_run
//! use wupdate_core::config::UpdateConfig;
//!
//! // Load (returns defaults if file doesn't exist)
//! let config = UpdateConfig::load();
//! println!("timeout: {}s", config.download_timeout_secs);
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const CONFIG_FILENAME: &str = "config.json";
const HOME_ENV: &str = "WUPDATE_HOME";
const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 300;

/// Returns the wupdate data directory, `~/.wupdate` unless `WUPDATE_HOME` is set.
pub fn wupdate_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(HOME_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".wupdate")
}

/// Persistent wupdate configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    /// Upper bound for a single `DOWNLOAD`, in seconds.
    pub download_timeout_secs: u64,

    /// `User-Agent` header sent with downloads.
    pub user_agent: String,

    /// Updater binary to hand off to after a successful run when the
    /// command line does not name one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updater_path: Option<PathBuf>,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            download_timeout_secs: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            user_agent: format!("wupdate/{}", env!("CARGO_PKG_VERSION")),
            updater_path: None,
        }
    }
}

impl UpdateConfig {
    /// Path of the config file inside [`wupdate_dir`].
    pub fn path() -> PathBuf {
        wupdate_dir().join(CONFIG_FILENAME)
    }

    /// Load config from `~/.wupdate/config.json`.
    ///
    /// Returns [`Default`] if the file does not exist or cannot be parsed.
    pub fn load() -> Self {
        std::fs::read_to_string(Self::path())
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = UpdateConfig::default();
        assert_eq!(config.download_timeout_secs, 300);
        assert!(config.user_agent.starts_with("wupdate/"));
        assert!(config.updater_path.is_none());
    }

    #[test]
    fn roundtrip_serialization() {
        let config = UpdateConfig {
            download_timeout_secs: 10,
            user_agent: "test-agent".to_string(),
            updater_path: Some(PathBuf::from("/opt/wyland/updater")),
        };
        let json = serde_json::to_string(&config).unwrap();
        let loaded: UpdateConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn deserialize_empty_json_uses_defaults() {
        let loaded: UpdateConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(loaded, UpdateConfig::default());
    }

    #[test]
    fn deserialize_partial_json() {
        let loaded: UpdateConfig =
            serde_json::from_str(r#"{"download_timeout_secs": 42}"#).unwrap();
        assert_eq!(loaded.download_timeout(), Duration::from_secs(42));
        assert!(loaded.user_agent.starts_with("wupdate/"));
    }

    #[test]
    fn load_does_not_panic() {
        // The real config file may or may not exist; load must never panic.
        let _ = UpdateConfig::load();
    }
}
