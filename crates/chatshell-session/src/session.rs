//! The chat session: one explicit object owning all conversation state.
//!
//! Constructed once by the application entry point and handed by reference to
//! whatever renders it. All operations return immediately; replies and voice
//! transcripts arrive later and are announced on the event bus.

use std::sync::Arc;

use chatshell_core::{
    Language, Message, Mode, Result, SessionEvent, SettingsSnapshot, ShellConfig,
};
use tokio::sync::broadcast;

use crate::bus::EventBus;
use crate::catalog::ResponseCatalog;
use crate::id::{IdGenerator, UuidIdGenerator};
use crate::platform::{LoggingSpeech, PlatformProbe, SpeechOutput, StaticPlatform};
use crate::settings::SessionSettings;
use crate::simulator::{ResponseSimulator, ResponseState, SendOutcome};
use crate::store::ConversationStore;
use crate::voice::{RecordingState, TranscriptSink, VoiceCaptureStub, VoiceOutcome};

/// Conversation session manager.
#[derive(Debug)]
pub struct ChatSession {
    store: Arc<ConversationStore>,
    settings: Arc<SessionSettings>,
    simulator: Arc<ResponseSimulator>,
    voice: Arc<VoiceCaptureStub>,
    events: EventBus,
}

impl ChatSession {
    /// Build a session from configuration with the default collaborators:
    /// UUID message ids, logging speech, and platform capabilities from `[platform]`.
    pub fn from_config(config: &ShellConfig) -> Result<Self> {
        Self::with_collaborators(
            config,
            Arc::new(UuidIdGenerator),
            Arc::new(LoggingSpeech),
            Arc::new(StaticPlatform::from(&config.platform)),
        )
    }

    /// Build a session with injected collaborators.
    pub fn with_collaborators(
        config: &ShellConfig,
        ids: Arc<dyn IdGenerator>,
        speech: Arc<dyn SpeechOutput>,
        platform: Arc<dyn PlatformProbe>,
    ) -> Result<Self> {
        let events = EventBus::default();
        let store = Arc::new(ConversationStore::new());
        let settings = Arc::new(SessionSettings::new(config.initial_settings()?));
        let catalog = ResponseCatalog::builtin().with_overrides(config.catalog_overrides()?)?;

        let simulator = Arc::new(
            ResponseSimulator::new(
                Arc::clone(&store),
                Arc::clone(&settings),
                catalog,
                events.clone(),
            )
            .with_config(&config.responses)
            .with_id_generator(ids)
            .with_speech(speech)
            .with_platform(Arc::clone(&platform)),
        );

        let sink_simulator = Arc::clone(&simulator);
        let sink: TranscriptSink = Arc::new(move |text: String| {
            sink_simulator.send(&text);
        });
        let voice = Arc::new(VoiceCaptureStub::new(
            &config.voice,
            platform,
            sink,
            events.clone(),
        ));

        tracing::info!(
            mode = %settings.active_mode(),
            language = %settings.language(),
            voice_enabled = settings.voice_enabled(),
            "Chat session created"
        );

        Ok(Self {
            store,
            settings,
            simulator,
            voice,
            events,
        })
    }

    // -------------------------------------------------------------------------
    // Conversation
    // -------------------------------------------------------------------------

    /// Send user input. Blank input is ignored; otherwise a reply is scheduled.
    pub fn send(&self, content: &str) -> SendOutcome {
        self.simulator.send(content)
    }

    /// Empty the conversation and abandon pending replies.
    ///
    /// Returns the number of replies abandoned.
    pub fn clear(&self) -> usize {
        let abandoned = self.store.clear();
        tracing::info!(abandoned, "Conversation cleared");
        if abandoned > 0 {
            self.events
                .emit(SessionEvent::LoadingChanged { is_loading: false });
        }
        self.events
            .emit(SessionEvent::ConversationCleared { abandoned });
        abandoned
    }

    /// Same as [`ChatSession::clear`]; the settings screen's "clear history" action.
    pub fn clear_history(&self) -> usize {
        self.clear()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.store.messages()
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn response_state(&self) -> ResponseState {
        self.simulator.state()
    }

    pub fn catalog(&self) -> &ResponseCatalog {
        self.simulator.catalog()
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    pub fn settings(&self) -> SettingsSnapshot {
        self.settings.snapshot()
    }

    pub fn language(&self) -> Language {
        self.settings.language()
    }

    pub fn voice_enabled(&self) -> bool {
        self.settings.voice_enabled()
    }

    pub fn active_mode(&self) -> Mode {
        self.settings.active_mode()
    }

    pub fn chat_history(&self) -> bool {
        self.settings.chat_history()
    }

    fn settings_changed(&self) {
        self.events.emit(SessionEvent::SettingsChanged {
            settings: self.settings.snapshot(),
        });
    }

    pub fn toggle_language(&self) -> Language {
        let language = self.settings.toggle_language();
        self.settings_changed();
        language
    }

    pub fn toggle_voice(&self) -> bool {
        let enabled = self.settings.toggle_voice();
        self.settings_changed();
        enabled
    }

    pub fn toggle_chat_history(&self) -> bool {
        let enabled = self.settings.toggle_chat_history();
        self.settings_changed();
        enabled
    }

    /// Select a mode by id. Unknown ids fail with `ShellError::InvalidMode`.
    pub fn set_mode(&self, mode: &str) -> Result<Mode> {
        let mode = self.settings.set_mode(mode)?;
        self.settings_changed();
        Ok(mode)
    }

    pub fn set_active_mode(&self, mode: Mode) {
        self.settings.set_active_mode(mode);
        self.settings_changed();
    }

    // -------------------------------------------------------------------------
    // Voice
    // -------------------------------------------------------------------------

    /// The microphone button: start recording when idle, cancel when recording.
    pub fn toggle_recording(&self) -> VoiceOutcome {
        self.voice.toggle()
    }

    pub fn recording_state(&self) -> RecordingState {
        self.voice.state()
    }

    /// Speak arbitrary text now, regardless of the voice setting.
    pub fn speak_message(&self, text: &str) {
        self.simulator.speak(text);
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

// =============================================================================
// Tests
// =============================================================================
