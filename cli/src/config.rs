//! Configuration management for the `tts` CLI.
//!
//! Configuration is stored in ~/.config/tts/config.toml. A missing, unreadable
//! or invalid file yields the defaults rather than an error, so a broken
//! config never blocks synthesis.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use ttskit_fishaudio::AudioFormat;

/// Configuration directory, relative to the home directory.
pub const DEFAULT_BASE_DIR: &str = ".config/tts";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
/// Default output directory for generated audio.
pub const DEFAULT_OUTPUT_DIR: &str = "./audio_output";
/// Slowest accepted speaking speed.
pub const MIN_SPEED: f32 = 0.5;
/// Fastest accepted speaking speed.
pub const MAX_SPEED: f32 = 2.0;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Voice model used when `--voice` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_voice: Option<String>,

    /// Directory generated audio is written to.
    pub output_dir: String,

    /// Output audio format.
    pub format: AudioFormat,

    /// Speaking speed multiplier.
    pub speed: f32,

    /// API base URL override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Path to the config file (not serialized).
    #[serde(skip)]
    config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_voice: None,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            format: AudioFormat::Mp3,
            speed: 1.0,
            base_url: None,
            config_path: PathBuf::new(),
        }
    }
}

/// Returns the config directory (~/.config/tts).
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR))
}

/// Validates a speaking speed.
pub fn validate_speed(speed: f32) -> anyhow::Result<()> {
    if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        anyhow::bail!(
            "speed must be between {} and {}: {}",
            MIN_SPEED,
            MAX_SPEED,
            speed
        );
    }
    Ok(())
}

impl Config {
    /// Gets the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        default_config_dir().map(|dir| dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Returns the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Checks that every value is within range.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_speed(self.speed)?;
        if self.output_dir.trim().is_empty() {
            anyhow::bail!("output directory cannot be empty");
        }
        if let Some(voice) = &self.default_voice {
            if voice.trim().is_empty() {
                anyhow::bail!("default voice cannot be empty");
            }
        }
        Ok(())
    }

    /// Saves the configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string(self)?;
        std::fs::write(&self.config_path, content)?;
        tracing::debug!(path = %self.config_path.display(), "saved config");
        Ok(())
    }

    /// Applies `change`, validates the result and saves it.
    ///
    /// Nothing is written when validation fails.
    pub fn update(&mut self, change: impl FnOnce(&mut Config)) -> anyhow::Result<()> {
        let mut next = self.clone();
        change(&mut next);
        next.validate()?;
        next.save()?;
        *self = next;
        Ok(())
    }

    /// Restores and saves the defaults.
    pub fn reset(&mut self) -> anyhow::Result<()> {
        let path = std::mem::take(&mut self.config_path);
        *self = Config {
            config_path: path,
            ..Config::default()
        };
        self.save()
    }
}

/// Loads the configuration, falling back to defaults on any problem.
pub fn load_config(custom_path: Option<&str>) -> anyhow::Result<Config> {
    let config_path = match custom_path {
        Some(p) => PathBuf::from(p),
        None => Config::default_path()
            .ok_or_else(|| anyhow::anyhow!("cannot determine config path"))?,
    };

    let mut cfg = if config_path.is_file() {
        parse_or_default(&config_path)
    } else {
        Config::default()
    };

    cfg.config_path = config_path;
    Ok(cfg)
}

fn parse_or_default(path: &Path) -> Config {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read config, using defaults");
            return Config::default();
        }
    };

    let cfg: Config = match toml::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            return Config::default();
        }
    };

    if let Err(e) = cfg.validate() {
        tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
        return Config::default();
    }
    cfg
}
