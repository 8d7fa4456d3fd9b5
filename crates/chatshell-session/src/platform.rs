//! Platform collaborators: capability probe and speech output.
//!
//! Neither is part of the session's correctness. Speech is fire-and-forget;
//! callers log a failure and move on.

use chatshell_core::config::PlatformConfig;
use chatshell_core::text::{detect_language, truncate_text};
use chatshell_core::{Language, Result};

/// Answers what the host platform can do.
pub trait PlatformProbe: Send + Sync {
    fn supports_voice_capture(&self) -> bool;
    fn supports_audio_output(&self) -> bool;
}

/// Capabilities fixed at construction, usually from the `[platform]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticPlatform {
    pub voice_capture: bool,
    pub audio_output: bool,
}

impl StaticPlatform {
    pub fn new(voice_capture: bool, audio_output: bool) -> Self {
        Self {
            voice_capture,
            audio_output,
        }
    }
}

impl Default for StaticPlatform {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl From<&PlatformConfig> for StaticPlatform {
    fn from(config: &PlatformConfig) -> Self {
        Self::new(config.voice_capture, config.audio_output)
    }
}

impl PlatformProbe for StaticPlatform {
    fn supports_voice_capture(&self) -> bool {
        self.voice_capture
    }

    fn supports_audio_output(&self) -> bool {
        self.audio_output
    }
}

/// Text-to-speech sink.
pub trait SpeechOutput: Send + Sync {
    fn speak(&self, text: &str, language: Language) -> Result<()>;
}

/// Speech stub that only logs what would have been spoken.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSpeech;

impl SpeechOutput for LoggingSpeech {
    fn speak(&self, text: &str, language: Language) -> Result<()> {
        tracing::info!(
            language = %language,
            detected = %detect_language(text),
            text = %truncate_text(text, 60),
            "Speaking"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_platform_from_config() {
        let config = PlatformConfig {
            voice_capture: false,
            audio_output: true,
        };
        let platform = StaticPlatform::from(&config);
        assert!(!platform.supports_voice_capture());
        assert!(platform.supports_audio_output());
    }

    #[test]
    fn test_static_platform_default_supports_everything() {
        let platform = StaticPlatform::default();
        assert!(platform.supports_voice_capture());
        assert!(platform.supports_audio_output());
    }

    #[test]
    fn test_logging_speech_never_fails() {
        let speech = LoggingSpeech;
        assert!(speech.speak("Hello", Language::English).is_ok());
        assert!(speech.speak("नमस्ते", Language::Hindi).is_ok());
        assert!(speech.speak("", Language::English).is_ok());
    }
}
