use serde::{Deserialize, Serialize};

use crate::types::{Message, SettingsSnapshot};

/// All domain events emitted by a chat session.
///
/// Events are broadcast after the state change they describe has been applied
/// and are consumed by the rendering layer (to redraw) and by logs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum SessionEvent {
    /// A message was appended to the conversation log.
    MessageAppended { message: Message },

    /// The loading indicator flipped.
    LoadingChanged { is_loading: bool },

    /// The conversation was cleared; `abandoned` pending replies were invalidated.
    ConversationCleared { abandoned: usize },

    /// Language, voice, mode or chat-history flag changed.
    SettingsChanged { settings: SettingsSnapshot },

    /// The voice stub entered the Recording state.
    RecordingStarted,

    /// The voice stub left Recording; `cancelled` is true if no transcript was produced.
    RecordingStopped { cancelled: bool },

    /// The voice stub produced text for the send path.
    TranscriptCaptured { text: String },

    /// A reply timer fired after its conversation generation was invalidated.
    StaleCompletionDropped { generation: u64 },
}

impl SessionEvent {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::MessageAppended { .. } => "message_appended",
            SessionEvent::LoadingChanged { .. } => "loading_changed",
            SessionEvent::ConversationCleared { .. } => "conversation_cleared",
            SessionEvent::SettingsChanged { .. } => "settings_changed",
            SessionEvent::RecordingStarted => "recording_started",
            SessionEvent::RecordingStopped { .. } => "recording_stopped",
            SessionEvent::TranscriptCaptured { .. } => "transcript_captured",
            SessionEvent::StaleCompletionDropped { .. } => "stale_completion_dropped",
        }
    }

    /// Serialize to a JSON value, as printed by the binary's `--json` output.
    pub fn to_json(&self) -> crate::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
