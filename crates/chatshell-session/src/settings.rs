//! Language, voice, chat-history and mode flags for a session.

use std::sync::{Mutex, MutexGuard};

use chatshell_core::{Language, Mode, Result, SettingsSnapshot};

/// Thread-safe session settings. Mutated only through the toggle/set methods.
#[derive(Debug, Default)]
pub struct SessionSettings {
    inner: Mutex<SettingsSnapshot>,
}

impl SessionSettings {
    pub fn new(initial: SettingsSnapshot) -> Self {
        Self {
            inner: Mutex::new(initial),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SettingsSnapshot> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> SettingsSnapshot {
        *self.lock()
    }

    pub fn language(&self) -> Language {
        self.lock().language
    }

    pub fn voice_enabled(&self) -> bool {
        self.lock().voice_enabled
    }

    pub fn active_mode(&self) -> Mode {
        self.lock().active_mode
    }

    pub fn chat_history(&self) -> bool {
        self.lock().chat_history
    }

    /// Flip between English and Hindi. Returns the new language.
    pub fn toggle_language(&self) -> Language {
        let mut s = self.lock();
        s.language = s.language.toggled();
        tracing::debug!(language = %s.language, "Language toggled");
        s.language
    }

    /// Flip spoken replies on or off. Returns the new value.
    pub fn toggle_voice(&self) -> bool {
        let mut s = self.lock();
        s.voice_enabled = !s.voice_enabled;
        tracing::debug!(voice_enabled = s.voice_enabled, "Voice toggled");
        s.voice_enabled
    }

    /// Flip the chat-history preference. Returns the new value.
    pub fn toggle_chat_history(&self) -> bool {
        let mut s = self.lock();
        s.chat_history = !s.chat_history;
        s.chat_history
    }

    /// Set the active mode from its string id.
    ///
    /// Unknown ids fail with `ShellError::InvalidMode` and leave the mode unchanged.
    pub fn set_mode(&self, mode: &str) -> Result<Mode> {
        let parsed = mode.parse::<Mode>()?;
        self.set_active_mode(parsed);
        Ok(parsed)
    }

    pub fn set_active_mode(&self, mode: Mode) {
        let mut s = self.lock();
        tracing::debug!("Mode: {} -> {}", s.active_mode, mode);
        s.active_mode = mode;
    }
}
