//! Configuration file loading.
//!
//! The file is TOML. Lookup order: `--config` path, then the `TERMTRIS_CONFIG`
//! environment variable, then `<config dir>/termtris/config.toml`. A missing
//! file means defaults; it is never created.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::GameSettings;
use crate::types::{DEFAULT_FLASH_PAUSE_MS, DEFAULT_IDLE_POLL_MS};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "TERMTRIS_CONFIG";

/// Where [`Config::discover`] got its values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// Nothing at the looked-up path, or no config directory at all
    Defaults(Option<PathBuf>),
}

impl ConfigSource {
    pub fn describe(&self) -> String {
        match self {
            ConfigSource::File(path) => format!("config loaded from {}", path.display()),
            ConfigSource::Defaults(Some(path)) => {
                format!("no config at {}, using defaults", path.display())
            }
            ConfigSource::Defaults(None) => "no config directory, using defaults".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Pause after each row-flash pass
    pub flash_pause_ms: u64,
    /// Longest wait for the first input event of a tick
    pub idle_poll_ms: u64,
    /// RNG seed; time based when absent
    pub seed: Option<u32>,
    /// Log file; logging is off when absent
    pub log_file: Option<PathBuf>,
    /// Default `env_logger` filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Start with the numeric board overlay shown
    pub debug_overlay: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flash_pause_ms: DEFAULT_FLASH_PAUSE_MS as u64,
            idle_poll_ms: DEFAULT_IDLE_POLL_MS as u64,
            seed: None,
            log_file: None,
            log_level: "info".to_string(),
            debug_overlay: false,
        }
    }
}

impl Config {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Load from the first location in the lookup order, or use defaults.
    ///
    /// Runs before logging is set up, so the returned [`ConfigSource`] is
    /// what the caller logs.
    pub fn discover(cli_path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        match config_path(cli_path, std::env::var_os(CONFIG_ENV)) {
            Some(path) if path.exists() => Ok((Self::load(&path)?, ConfigSource::File(path))),
            other => Ok((Self::default(), ConfigSource::Defaults(other))),
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loop settings derived from this config.
    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            flash_pause: Duration::from_millis(self.flash_pause_ms),
            idle_poll: Duration::from_millis(self.idle_poll_ms),
            debug_overlay: self.debug_overlay,
        }
    }
}

/// Resolve the config file path from the CLI flag, the environment value
/// and the platform config directory, in that order.
pub fn config_path(cli_path: Option<&Path>, env_value: Option<OsString>) -> Option<PathBuf> {
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(value));
    }
    dirs::config_dir().map(|dir| dir.join("termtris").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_loop_defaults() {
        let config = Config::default();
        assert_eq!(config.game_settings(), GameSettings::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse("seed = 42\ndebug_overlay = true\n").unwrap();
        assert_eq!(config.seed, Some(42));
        assert!(config.debug_overlay);
        assert_eq!(config.flash_pause_ms, 300);
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(Config::parse("gravity = 9\n").is_err());
    }

    #[test]
    fn cli_path_beats_env() {
        let path = config_path(
            Some(Path::new("/tmp/a.toml")),
            Some(OsString::from("/tmp/b.toml")),
        );
        assert_eq!(path, Some(PathBuf::from("/tmp/a.toml")));

        let path = config_path(None, Some(OsString::from("/tmp/b.toml")));
        assert_eq!(path, Some(PathBuf::from("/tmp/b.toml")));
    }

    #[test]
    fn source_description_names_the_path() {
        let source = ConfigSource::Defaults(Some(PathBuf::from("/tmp/none.toml")));
        assert_eq!(source.describe(), "no config at /tmp/none.toml, using defaults");
        let source = ConfigSource::File(PathBuf::from("/tmp/c.toml"));
        assert_eq!(source.describe(), "config loaded from /tmp/c.toml");
    }

    #[test]
    fn toml_round_trip_preserves_values() {
        let config = Config {
            seed: Some(7),
            log_file: Some(PathBuf::from("termtris.log")),
            ..Config::default()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(Config::parse(&text).unwrap(), config);
    }
}
