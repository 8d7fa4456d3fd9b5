use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ShellError;

// =============================================================================
// Enums
// =============================================================================

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Typed or dictated by the person using the app.
    User,
    /// Produced by the response simulator.
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Interface language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
}

impl Language {
    /// The other supported language.
    pub fn toggled(self) -> Self {
        match self {
            Language::English => Language::Hindi,
            Language::Hindi => Language::English,
        }
    }

    /// Short language code used in config files and logs.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "hi" | "hindi" => Ok(Language::Hindi),
            _ => Err(ShellError::InvalidLanguage(s.to_string())),
        }
    }
}

/// Conversational persona that selects which reply catalog is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Default,
    Deep,
    Math,
    Knowledge,
    Student,
    Coding,
    Fun,
    Offline,
}

impl Mode {
    /// Every mode, in picker order.
    pub const ALL: [Mode; 8] = [
        Mode::Default,
        Mode::Deep,
        Mode::Math,
        Mode::Knowledge,
        Mode::Student,
        Mode::Coding,
        Mode::Fun,
        Mode::Offline,
    ];

    /// Lowercase identifier, as accepted by [`Mode::from_str`].
    pub fn id(self) -> &'static str {
        match self {
            Mode::Default => "default",
            Mode::Deep => "deep",
            Mode::Math => "math",
            Mode::Knowledge => "knowledge",
            Mode::Student => "student",
            Mode::Coding => "coding",
            Mode::Fun => "fun",
            Mode::Offline => "offline",
        }
    }

    /// Title shown on the mode card.
    pub fn title(self) -> &'static str {
        match self {
            Mode::Default => "Assistant",
            Mode::Deep => "Deep Questions",
            Mode::Math => "Math Mode",
            Mode::Knowledge => "General Knowledge",
            Mode::Student => "Student Mode",
            Mode::Coding => "Coding Help",
            Mode::Fun => "Fun Mode",
            Mode::Offline => "Offline Mode",
        }
    }

    /// One-line description shown under the title.
    pub fn description(self) -> &'static str {
        match self {
            Mode::Default => "General-purpose conversation",
            Mode::Deep => "Philosophical and emotional intelligence",
            Mode::Math => "Solve equations with step-by-step solutions",
            Mode::Knowledge => "Facts from history, science, and more",
            Mode::Student => "Homework help and educational resources",
            Mode::Coding => "Programming assistance in multiple languages",
            Mode::Fun => "Jokes, riddles, and brain games",
            Mode::Offline => "Basic features without internet",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Mode {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Mode::ALL
            .into_iter()
            .find(|m| m.id() == wanted)
            .ok_or_else(|| ShellError::InvalidMode(s.to_string()))
    }
}

// =============================================================================
// Newtype Wrappers - Identity
// =============================================================================

/// Opaque unique identifier for a chat message.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// A fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Structs
// =============================================================================

/// A single entry in the conversation log. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    /// Wall-clock creation time, for display. Conversation order is the
    /// message's position in the log, never this field.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(id: MessageId, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Point-in-time copy of the session settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    pub language: Language,
    pub voice_enabled: bool,
    pub active_mode: Mode,
    pub chat_history: bool,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            language: Language::English,
            voice_enabled: true,
            active_mode: Mode::Default,
            chat_history: true,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str_accepts_every_id() {
        for mode in Mode::ALL {
            assert_eq!(mode.id().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_mode_from_str_is_case_and_space_insensitive() {
        assert_eq!(" Math ".parse::<Mode>().unwrap(), Mode::Math);
        assert_eq!("CODING".parse::<Mode>().unwrap(), Mode::Coding);
    }

    #[test]
    fn test_mode_from_str_rejects_unknown() {
        let err = "bogus".parse::<Mode>().unwrap_err();
        assert!(matches!(err, ShellError::InvalidMode(ref m) if m == "bogus"));
        assert!("".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_metadata_is_populated() {
        for mode in Mode::ALL {
            assert!(!mode.title().is_empty());
            assert!(!mode.description().is_empty());
        }
        assert_eq!(Mode::Math.title(), "Math Mode");
        assert_eq!(Mode::Offline.description(), "Basic features without internet");
    }

    #[test]
    fn test_mode_serde_uses_ids() {
        let json = serde_json::to_string(&Mode::Knowledge).unwrap();
        assert_eq!(json, "\"knowledge\"");
        let back: Mode = serde_json::from_str("\"fun\"").unwrap();
        assert_eq!(back, Mode::Fun);
    }

    #[test]
    fn test_language_toggle_is_involution() {
        for lang in [Language::English, Language::Hindi] {
            assert_ne!(lang.toggled(), lang);
            assert_eq!(lang.toggled().toggled(), lang);
        }
    }

    #[test]
    fn test_language_parse_and_display() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("Hindi".parse::<Language>().unwrap(), Language::Hindi);
        assert!(matches!(
            "fr".parse::<Language>(),
            Err(ShellError::InvalidLanguage(_))
        ));
        assert_eq!(Language::Hindi.to_string(), "hi");
        assert_eq!(serde_json::to_string(&Language::Hindi).unwrap(), "\"hi\"");
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = MessageId::new();
        let b = MessageId::new();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_message_serializes_role_lowercase() {
        let msg = Message::new(MessageId("m1".to_string()), Role::Assistant, "hi");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "assistant");
        assert_eq!(value["content"], "hi");
        assert_eq!(value["id"], "m1");
        assert!(!msg.is_user());
    }

    #[test]
    fn test_settings_snapshot_defaults() {
        let s = SettingsSnapshot::default();
        assert_eq!(s.language, Language::English);
        assert!(s.voice_enabled);
        assert_eq!(s.active_mode, Mode::Default);
        assert!(s.chat_history);
    }
}
