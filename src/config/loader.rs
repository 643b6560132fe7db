//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CRUSHPLAYS_CONFIG";

/// Environment variable overriding the audio base address.
pub const AUDIO_URL_ENV: &str = "CRUSHPLAYS_AUDIO_URL";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/crushplays/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Initial volume in `[0, 1]`.
    #[serde(default)]
    pub volume: Option<f64>,

    /// Start muted.
    #[serde(default)]
    pub muted: Option<bool>,

    /// Allow audible playback before the first interaction.
    #[serde(default)]
    pub autoplay: Option<bool>,

    /// Seconds each footer compliment stays on screen.
    #[serde(default)]
    pub compliment_interval_secs: Option<u64>,

    /// Base address of the audio endpoint.
    #[serde(default)]
    pub audio_base_url: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Initial volume, clamped to `[0, 1]` on use.
    pub volume: f64,
    /// Start muted.
    pub muted: bool,
    /// Autoplay policy of the audio backend.
    pub autoplay: bool,
    /// Footer rotation period.
    pub compliment_interval: Duration,
    /// Base address of the audio endpoint.
    pub audio_base_url: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            volume: 0.5,
            muted: true,
            autoplay: false,
            compliment_interval: Duration::from_secs(10),
            audio_base_url: "http://localhost:3000".to_string(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/crushplays/crushplays.log` on Linux, or the
/// platform state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("crushplays").join("crushplays.log")
    } else {
        PathBuf::from("crushplays.log")
    }
}

/// Resolve default config file path.
///
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("crushplays").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CRUSHPLAYS_CONFIG` environment variable
/// 3. Default path `~/.config/crushplays/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        volume: config.volume.unwrap_or(defaults.volume),
        muted: config.muted.unwrap_or(defaults.muted),
        autoplay: config.autoplay.unwrap_or(defaults.autoplay),
        compliment_interval: config
            .compliment_interval_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.compliment_interval),
        audio_base_url: config.audio_base_url.unwrap_or(defaults.audio_base_url),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `CRUSHPLAYS_AUDIO_URL`. Empty values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(url) = std::env::var(AUDIO_URL_ENV) {
        if !url.trim().is_empty() {
            config.audio_base_url = url;
        }
    }

    config
}

/// Flags given on the command line. `None`/`false` leaves the value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `--volume`
    pub volume: Option<f64>,
    /// `--unmuted`
    pub unmuted: bool,
    /// `--autoplay`
    pub autoplay: bool,
    /// `--interval`
    pub interval_secs: Option<u64>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: &CliOverrides) -> ResolvedConfig {
    if let Some(volume) = cli.volume {
        config.volume = volume;
    }

    if cli.unmuted {
        config.muted = false;
    }

    if cli.autoplay {
        config.autoplay = true;
    }

    if let Some(secs) = cli.interval_secs.filter(|secs| *secs > 0) {
        config.compliment_interval = Duration::from_secs(secs);
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
