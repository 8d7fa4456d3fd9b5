use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, ShellError};
use crate::types::{Language, Mode, SettingsSnapshot};

/// Top-level configuration for the chat shell.
///
/// Loaded from `~/.chatshell/config.toml` by default. Every section is
/// optional; missing sections and fields fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub responses: ResponseConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
    /// Reply overrides keyed by mode id (`"math"`, `"fun"`, ...).
    #[serde(default)]
    pub catalog: BTreeMap<String, Vec<String>>,
}

impl ShellConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ShellConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Initial session settings described by the `[session]` section.
    pub fn initial_settings(&self) -> Result<SettingsSnapshot> {
        Ok(SettingsSnapshot {
            language: self.session.language.parse::<Language>()?,
            voice_enabled: self.session.voice_enabled,
            active_mode: self.session.default_mode.parse::<Mode>()?,
            chat_history: self.session.chat_history,
        })
    }

    /// Parse the `[catalog]` overrides into typed modes.
    ///
    /// Unknown mode keys and empty reply lists are rejected.
    pub fn catalog_overrides(&self) -> Result<Vec<(Mode, Vec<String>)>> {
        self.catalog
            .iter()
            .map(|(key, replies)| {
                let mode = key.parse::<Mode>()?;
                if replies.is_empty() {
                    return Err(ShellError::Config(format!(
                        "catalog entry for mode '{}' has no replies",
                        key
                    )));
                }
                Ok((mode, replies.clone()))
            })
            .collect()
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Initial values for the session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Language code: "en" or "hi".
    pub language: String,
    /// Speak assistant replies aloud.
    pub voice_enabled: bool,
    /// Mode active when the session starts.
    pub default_mode: String,
    /// Whether the chat-history setting starts switched on.
    pub chat_history: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            voice_enabled: true,
            default_mode: "default".to_string(),
            chat_history: true,
        }
    }
}

/// Simulated reply latency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Lower bound of the reply delay in milliseconds.
    pub min_delay_ms: u64,
    /// Width of the uniform delay window in milliseconds.
    pub delay_span_ms: u64,
    /// Fixed RNG seed. When unset the generator is seeded from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1000,
            delay_span_ms: 1500,
            seed: None,
        }
    }
}

/// Voice capture stub behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// How long a simulated recording lasts before it yields a transcript.
    pub capture_delay_ms: u64,
    /// Text yielded by a completed recording.
    pub placeholder_transcript: String,
    /// Text yielded immediately when the platform cannot record.
    pub unsupported_message: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            capture_delay_ms: 3000,
            placeholder_transcript:
                "This is a simulated voice message from the VoiceButton component.".to_string(),
            unsupported_message: "Voice recording is not supported in the web version. \
                                  Please use the text input instead."
                .to_string(),
        }
    }
}

/// Platform capabilities reported to the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Whether the platform can record audio.
    pub voice_capture: bool,
    /// Whether the platform can play synthesized speech.
    pub audio_output: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            voice_capture: true,
            audio_output: true,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
