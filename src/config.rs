//! Engine settings, stored as a JSON file that may omit any field.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "ROLEPLAY_CHAT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ── Engine Config ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Typewriter speed, per character.
    #[serde(default = "default_typing_interval_ms")]
    pub typing_interval_ms: u64,
    /// How long a reply's emotion stays on the portrait after it is fully shown.
    #[serde(default = "default_emotion_reset_delay_ms")]
    pub emotion_reset_delay_ms: u64,
    #[serde(default = "default_image_fade_ms")]
    pub image_fade_ms: u64,
    /// Simulated "typing..." pause before a reply arrives.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    /// Master gain for UI cues, 0.0–1.0.
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Narrow reply emotions to the character's preferred set.
    #[serde(default)]
    pub personality_bias: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            typing_interval_ms: default_typing_interval_ms(),
            emotion_reset_delay_ms: default_emotion_reset_delay_ms(),
            image_fade_ms: default_image_fade_ms(),
            reply_delay_ms: default_reply_delay_ms(),
            max_message_length: default_max_message_length(),
            sound_enabled: true,
            volume: default_volume(),
            personality_bias: false,
        }
    }
}

fn default_typing_interval_ms() -> u64 {
    30
}
fn default_emotion_reset_delay_ms() -> u64 {
    3000
}
fn default_image_fade_ms() -> u64 {
    150
}
fn default_reply_delay_ms() -> u64 {
    2000
}
fn default_max_message_length() -> usize {
    1000
}
fn default_true() -> bool {
    true
}
fn default_volume() -> f32 {
    1.0
}

impl EngineConfig {
    pub fn typing_interval(&self) -> Duration {
        Duration::from_millis(self.typing_interval_ms)
    }

    pub fn emotion_reset_delay(&self) -> Duration {
        Duration::from_millis(self.emotion_reset_delay_ms)
    }

    pub fn image_fade(&self) -> Duration {
        Duration::from_millis(self.image_fade_ms)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn volume(&self) -> f32 {
        if self.volume.is_nan() {
            return 0.0;
        }
        self.volume.clamp(0.0, 1.0)
    }
}

/// Config file location: `$ROLEPLAY_CHAT_CONFIG`, else
/// `<config dir>/roleplay-chat/engine.json`.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("roleplay-chat")
        .join("engine.json")
}

pub fn load_config(path: &Path) -> EngineConfig {
    read_json_or_default(path, "engine")
}

pub fn save_config(path: &Path, config: &EngineConfig) -> Result<(), ConfigError> {
    write_json_pretty(path, config, "engine")
}

// ── JSON files ─────────────────────────────────────────

/// Read a settings file, keeping defaults for anything that cannot be used.
///
/// A missing file is normal on first run. Unreadable or malformed files are
/// reported at `warn` and ignored.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path, kind: &str) -> T {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(kind, path = %path.display(), "settings file absent, defaults apply");
            return T::default();
        }
        Err(e) => {
            tracing::warn!(kind, path = %path.display(), error = %e, "settings file unreadable, defaults apply");
            return T::default();
        }
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(kind, path = %path.display(), error = %e, "settings file malformed, defaults apply");
        T::default()
    })
}

/// Write `value` as indented JSON, creating parent directories as needed.
pub fn write_json_pretty<T: Serialize>(
    path: &Path,
    value: &T,
    kind: &str,
) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(value)?;
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, json).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(kind, path = %path.display(), "settings saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = load_config(&tmp.path().join("absent.json"));
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.typing_interval(), Duration::from_millis(30));
        assert_eq!(config.emotion_reset_delay(), Duration::from_millis(3000));
    }

    #[test]
    fn unparsable_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("engine.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_config(&path), EngineConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("engine.json");
        std::fs::write(&path, r#"{ "typing_interval_ms": 5, "personality_bias": true }"#).unwrap();
        let config = load_config(&path);
        assert_eq!(config.typing_interval_ms, 5);
        assert!(config.personality_bias);
        assert_eq!(config.max_message_length, 1000);
        assert!(config.sound_enabled);
    }

    #[test]
    fn save_creates_directories_and_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("dir").join("engine.json");
        let config = EngineConfig {
            reply_delay_ms: 0,
            volume: 0.4,
            ..EngineConfig::default()
        };
        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path), config);
    }

    #[test]
    fn save_into_a_file_path_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let err = save_config(&blocker.join("engine.json"), &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::CreateDir { .. }), "got {:?}", err);
    }

    #[test]
    fn helpers_work_for_other_settings_types() {
        #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
        struct Window {
            width: u32,
        }
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("window.json");
        assert_eq!(read_json_or_default::<Window>(&path, "window"), Window::default());
        write_json_pretty(&path, &Window { width: 640 }, "window").unwrap();
        assert_eq!(read_json_or_default::<Window>(&path, "window").width, 640);
    }

    #[test]
    fn unreadable_path_gives_defaults() {
        // A directory exists at the path but cannot be read as a file.
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(load_config(tmp.path()), EngineConfig::default());
    }

    #[test]
    fn volume_is_clamped() {
        let loud = EngineConfig {
            volume: 3.0,
            ..EngineConfig::default()
        };
        assert_eq!(loud.volume(), 1.0);
        let broken = EngineConfig {
            volume: f32::NAN,
            ..EngineConfig::default()
        };
        assert_eq!(broken.volume(), 0.0);
    }
}
