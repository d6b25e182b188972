//! Configuration loading for CycleSync.
//!
//! Reads `~/.cyclesync/config.toml`, or the file named by `CYCLESYNC_CONFIG`.
//! A missing file is not an error: every section has a default.
//!
//! ```toml
//! [cycle]
//! default_length = 28
//!
//! [notifications]
//! support_reminders = true
//! phase_changes = false
//!
//! [privacy]
//! consent_logging = true
//!
//! [account]
//! export_dir = "~/.cyclesync/exports"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use cyclesync_types::{CycleLength, NotificationSettings, ValidationError};

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "CYCLESYNC_CONFIG";

const CONFIG_DIR: &str = ".cyclesync";
const CONFIG_FILE: &str = "config.toml";
const EXPORT_DIR: &str = "exports";

// Default value function for serde (bool::default() is false, so only true needs a fn)
const fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct CycleSyncConfig {
    pub cycle: Option<CycleConfig>,
    pub notifications: Option<NotificationSettings>,
    pub privacy: Option<PrivacyConfig>,
    pub account: Option<AccountConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Cycle defaults for newly tracked partners.
#[derive(Debug, Default, Deserialize)]
pub struct CycleConfig {
    /// Days. Validated against the supported range when read, never clamped.
    pub default_length: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PrivacyConfig {
    /// Keep a history of every consent change. Default: true.
    #[serde(default = "default_true")]
    pub consent_logging: bool,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            consent_logging: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AccountConfig {
    /// Where "Export My Data" writes. `~/` is expanded.
    pub export_dir: Option<String>,
}

impl CycleSyncConfig {
    /// Load from the default location. `Ok(None)` when there is no config file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match Self::parse(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    #[must_use]
    pub fn notification_settings(&self) -> NotificationSettings {
        self.notifications.unwrap_or_default()
    }

    #[must_use]
    pub fn consent_logging(&self) -> bool {
        self.privacy
            .as_ref()
            .map_or(true, |privacy| privacy.consent_logging)
    }

    /// Cycle length used when a partner's own length is unknown.
    pub fn default_cycle_length(&self) -> Result<CycleLength, ValidationError> {
        match self.cycle.as_ref().and_then(|cycle| cycle.default_length) {
            Some(days) => CycleLength::new(days),
            None => Ok(CycleLength::DEFAULT),
        }
    }

    /// Resolved export directory, falling back to `~/.cyclesync/exports`.
    #[must_use]
    pub fn export_dir(&self) -> Option<PathBuf> {
        match self
            .account
            .as_ref()
            .and_then(|account| account.export_dir.as_deref())
        {
            Some(raw) => Some(expand_home(raw, dirs::home_dir().as_deref())),
            None => dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(EXPORT_DIR)),
        }
    }
}

/// Config file location: `$CYCLESYNC_CONFIG`, else `~/.cyclesync/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    match (raw.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ if raw == "~" => home.map_or_else(|| PathBuf::from(raw), Path::to_path_buf),
        _ => PathBuf::from(raw),
    }
}
