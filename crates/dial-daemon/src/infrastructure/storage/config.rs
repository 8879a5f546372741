//! TOML configuration for the dial daemon.
//!
//! Default location: `/etc/zone-dials/config.toml`.
//!
//! ```toml
//! [dials]
//! left = "volume"
//! right = "brightness"
//!
//! [device]
//! mode = "hidraw"            # or "evdev"
//!
//! [timing]
//! search_interval_ms = 3000
//! poll_timeout_ms = 2000
//! error_pause_ms = 2000
//! grab_backoff_initial_ms = 1000
//! grab_backoff_max_ms = 30000
//!
//! [backlight]
//! class_root = "/sys/class/backlight"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent, and `#[serde(default)]` on a
//! section lets the whole table be omitted.

use std::path::{Path, PathBuf};
use std::time::Duration;

use dial_core::{DEFAULT_LEFT_ACTION, DEFAULT_RIGHT_ACTION};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::session::SessionConfig;
use crate::infrastructure::backlight::DEFAULT_CLASS_ROOT;
use crate::infrastructure::event_source::SourceMode;

/// Default config file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/zone-dials/config.toml";

/// Largest heartbeat `poll(2)` accepts through nix's `PollTimeout`.
pub const MAX_POLL_TIMEOUT_MS: u64 = u16::MAX as u64;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error other than "not found" occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// `timing.poll_timeout_ms` is larger than a single poll can wait.
    #[error("timing.poll_timeout_ms = {0} exceeds the limit of {max} ms", max = MAX_POLL_TIMEOUT_MS)]
    PollTimeoutTooLarge(u64),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level daemon configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DaemonConfig {
    pub dials: DialsConfig,
    pub device: DeviceConfig,
    pub timing: TimingConfig,
    pub backlight: BacklightConfig,
    pub logging: LoggingConfig,
}

/// Action names bound to each dial.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DialsConfig {
    #[serde(default = "default_left")]
    pub left: String,
    #[serde(default = "default_right")]
    pub right: String,
}

/// Hardware integration mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    #[serde(default)]
    pub mode: SourceMode,
}

/// Session loop timing, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    #[serde(default = "default_search_interval_ms")]
    pub search_interval_ms: u64,
    /// Heartbeat: longest single wait on an open device.  At most
    /// [`MAX_POLL_TIMEOUT_MS`]; larger values are rejected by [`load_config`].
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
    #[serde(default = "default_error_pause_ms")]
    pub error_pause_ms: u64,
    #[serde(default = "default_grab_backoff_initial_ms")]
    pub grab_backoff_initial_ms: u64,
    #[serde(default = "default_grab_backoff_max_ms")]
    pub grab_backoff_max_ms: u64,
}

/// Backlight surface location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacklightConfig {
    #[serde(default = "default_class_root")]
    pub class_root: PathBuf,
}

/// Log verbosity used when `RUST_LOG` is unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_left() -> String {
    DEFAULT_LEFT_ACTION.to_string()
}
fn default_right() -> String {
    DEFAULT_RIGHT_ACTION.to_string()
}
fn default_search_interval_ms() -> u64 {
    3000
}
fn default_poll_timeout_ms() -> u64 {
    2000
}
fn default_error_pause_ms() -> u64 {
    2000
}
fn default_grab_backoff_initial_ms() -> u64 {
    1000
}
fn default_grab_backoff_max_ms() -> u64 {
    30000
}
fn default_class_root() -> PathBuf {
    PathBuf::from(DEFAULT_CLASS_ROOT)
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DialsConfig {
    fn default() -> Self {
        Self {
            left: default_left(),
            right: default_right(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            search_interval_ms: default_search_interval_ms(),
            poll_timeout_ms: default_poll_timeout_ms(),
            error_pause_ms: default_error_pause_ms(),
            grab_backoff_initial_ms: default_grab_backoff_initial_ms(),
            grab_backoff_max_ms: default_grab_backoff_max_ms(),
        }
    }
}

impl Default for BacklightConfig {
    fn default() -> Self {
        Self {
            class_root: default_class_root(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl DaemonConfig {
    /// Checks values the schema alone cannot constrain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PollTimeoutTooLarge`] if the heartbeat exceeds
    /// [`MAX_POLL_TIMEOUT_MS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.poll_timeout_ms > MAX_POLL_TIMEOUT_MS {
            return Err(ConfigError::PollTimeoutTooLarge(self.timing.poll_timeout_ms));
        }
        Ok(())
    }
}

impl TimingConfig {
    /// Heartbeat timeout for the event sources.
    pub fn heartbeat(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    /// Session state machine timing.
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            search_interval: Duration::from_millis(self.search_interval_ms),
            error_pause: Duration::from_millis(self.error_pause_ms),
            grab_backoff_initial: Duration::from_millis(self.grab_backoff_initial_ms),
            grab_backoff_max: Duration::from_millis(
                self.grab_backoff_max_ms.max(self.grab_backoff_initial_ms),
            ),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Loads `DaemonConfig` from `path`, returning `DaemonConfig::default()` if
/// the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and
/// [`ConfigError::PollTimeoutTooLarge`] for a heartbeat `poll(2)` cannot wait.
pub fn load_config(path: &Path) -> Result<DaemonConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let config: DaemonConfig = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DaemonConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
