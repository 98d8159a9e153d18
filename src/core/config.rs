use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::errors::ConfigError;

/// Configuration for the diagnostics, loadable from TOML with CLI overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WinprobeConfig {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

/// What to look for: process-name substring, menu-bar marker, and the
/// executable to launch for the probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetConfig {
    #[serde(default = "default_target_name")]
    pub name: String,
    #[serde(default = "default_marker")]
    pub marker: String,
    #[serde(default = "default_executable")]
    pub executable: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    #[serde(default = "default_init_wait_secs")]
    pub init_wait_secs: u64,
    #[serde(default = "default_drain_timeout_secs")]
    pub drain_timeout_secs: u64,
}

fn default_target_name() -> String {
    "WindowPreview".to_string()
}

fn default_marker() -> String {
    "WP".to_string()
}

fn default_executable() -> PathBuf {
    PathBuf::from("build/Release/WindowPreview.app/Contents/MacOS/WindowPreview")
}

fn default_init_wait_secs() -> u64 {
    3
}

fn default_drain_timeout_secs() -> u64 {
    2
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            name: default_target_name(),
            marker: default_marker(),
            executable: default_executable(),
            args: Vec::new(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            init_wait_secs: default_init_wait_secs(),
            drain_timeout_secs: default_drain_timeout_secs(),
        }
    }
}

impl TimingConfig {
    pub fn init_wait(&self) -> Duration {
        Duration::from_secs(self.init_wait_secs)
    }

    pub fn drain_timeout(&self) -> Duration {
        Duration::from_secs(self.drain_timeout_secs)
    }
}

impl WinprobeConfig {
    /// Load the config hierarchy: user config, then project config on top.
    ///
    /// Missing files are fine; the built-in defaults apply. A file that
    /// exists but fails to parse is reported to the caller.
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        let mut config = WinprobeConfig::default();

        if let Some(user_config) = Self::load_user_config()? {
            config = Self::merge_configs(config, user_config);
        }

        if let Some(project_config) = Self::load_project_config()? {
            config = Self::merge_configs(config, project_config);
        }

        Ok(config)
    }

    fn load_user_config() -> Result<Option<WinprobeConfig>, ConfigError> {
        let Some(home_dir) = dirs::home_dir() else {
            return Ok(None);
        };
        let config_path = home_dir.join(".winprobe").join("config.toml");
        Self::load_config_file(&config_path)
    }

    fn load_project_config() -> Result<Option<WinprobeConfig>, ConfigError> {
        Self::load_config_file(Path::new("winprobe.toml"))
    }

    pub fn load_config_file(path: &Path) -> Result<Option<WinprobeConfig>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(Some(config))
    }

    fn merge_configs(base: WinprobeConfig, override_config: WinprobeConfig) -> WinprobeConfig {
        let defaults = WinprobeConfig::default();

        fn pick<T: PartialEq>(base: T, over: T, default: &T) -> T {
            if over != *default { over } else { base }
        }

        WinprobeConfig {
            target: TargetConfig {
                name: pick(
                    base.target.name,
                    override_config.target.name,
                    &defaults.target.name,
                ),
                marker: pick(
                    base.target.marker,
                    override_config.target.marker,
                    &defaults.target.marker,
                ),
                executable: pick(
                    base.target.executable,
                    override_config.target.executable,
                    &defaults.target.executable,
                ),
                args: pick(
                    base.target.args,
                    override_config.target.args,
                    &defaults.target.args,
                ),
            },
            timing: TimingConfig {
                init_wait_secs: pick(
                    base.timing.init_wait_secs,
                    override_config.timing.init_wait_secs,
                    &defaults.timing.init_wait_secs,
                ),
                drain_timeout_secs: pick(
                    base.timing.drain_timeout_secs,
                    override_config.timing.drain_timeout_secs,
                    &defaults.timing.drain_timeout_secs,
                ),
            },
        }
    }
}
