//! Voice capture stub.
//!
//! Simulates the microphone button:
//! - Idle -> Recording (start on a platform that can record)
//! - Recording -> Idle (capture delay elapsed, placeholder transcript delivered)
//! - Recording -> Idle (toggled again before the delay, nothing delivered)
//!
//! On a platform without capture support, `start` delivers a fixed notice
//! immediately and never enters Recording. Delivered text goes to a
//! [`TranscriptSink`], which the session wires to its send path.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chatshell_core::config::VoiceConfig;
use chatshell_core::SessionEvent;

use crate::bus::EventBus;
use crate::platform::PlatformProbe;

/// Receives captured text.
pub type TranscriptSink = Arc<dyn Fn(String) + Send + Sync>;

/// Operational state of the voice stub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordingState {
    Idle,
    Recording,
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordingState::Idle => write!(f, "Idle"),
            RecordingState::Recording => write!(f, "Recording"),
        }
    }
}

/// What a `start` or `toggle` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceOutcome {
    /// Platform cannot record; the notice text was delivered.
    Unsupported,
    /// Entered Recording; a transcript will follow after the capture delay.
    Started,
    /// Already recording; nothing changed.
    AlreadyRecording,
    /// A recording in progress was abandoned.
    Cancelled,
    /// Cancel requested while idle; nothing changed.
    NotRecording,
}

#[derive(Debug)]
struct VoiceState {
    current: RecordingState,
    generation: u64,
}

/// Simulated timed recording session.
pub struct VoiceCaptureStub {
    state: Mutex<VoiceState>,
    platform: Arc<dyn PlatformProbe>,
    sink: TranscriptSink,
    events: EventBus,
    capture_delay: Duration,
    placeholder_transcript: String,
    unsupported_message: String,
}

impl fmt::Debug for VoiceCaptureStub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceCaptureStub")
            .field("state", &self.state)
            .field("capture_delay", &self.capture_delay)
            .finish()
    }
}

impl VoiceCaptureStub {
    pub fn new(
        config: &VoiceConfig,
        platform: Arc<dyn PlatformProbe>,
        sink: TranscriptSink,
        events: EventBus,
    ) -> Self {
        Self {
            state: Mutex::new(VoiceState {
                current: RecordingState::Idle,
                generation: 0,
            }),
            platform,
            sink,
            events,
            capture_delay: Duration::from_millis(config.capture_delay_ms),
            placeholder_transcript: config.placeholder_transcript.clone(),
            unsupported_message: config.unsupported_message.clone(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VoiceState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> RecordingState {
        self.lock().current
    }

    pub fn is_recording(&self) -> bool {
        self.state() == RecordingState::Recording
    }

    /// Begin a simulated recording.
    ///
    /// # Panics
    ///
    /// Panics if recording starts outside a Tokio runtime.
    pub fn start(self: &Arc<Self>) -> VoiceOutcome {
        if !self.platform.supports_voice_capture() {
            tracing::info!("Voice capture unsupported on this platform");
            self.deliver(self.unsupported_message.clone());
            return VoiceOutcome::Unsupported;
        }

        let generation = {
            let mut state = self.lock();
            if state.current == RecordingState::Recording {
                return VoiceOutcome::AlreadyRecording;
            }
            tracing::debug!("Voice state: {} -> {}", state.current, RecordingState::Recording);
            state.current = RecordingState::Recording;
            state.generation
        };
        self.events.emit(SessionEvent::RecordingStarted);

        let this = Arc::clone(self);
        let delay = self.capture_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            this.finish(generation);
        });

        VoiceOutcome::Started
    }

    /// Start when idle, cancel when recording.
    pub fn toggle(self: &Arc<Self>) -> VoiceOutcome {
        if self.is_recording() {
            self.cancel()
        } else {
            self.start()
        }
    }

    /// Abandon the current recording without producing a transcript.
    pub fn cancel(&self) -> VoiceOutcome {
        {
            let mut state = self.lock();
            if state.current != RecordingState::Recording {
                return VoiceOutcome::NotRecording;
            }
            state.current = RecordingState::Idle;
            state.generation += 1;
        }
        tracing::info!("Voice recording cancelled");
        self.events
            .emit(SessionEvent::RecordingStopped { cancelled: true });
        VoiceOutcome::Cancelled
    }

    /// Timer completion for the recording started under `generation`.
    fn finish(&self, generation: u64) {
        {
            let mut state = self.lock();
            if state.generation != generation || state.current != RecordingState::Recording {
                tracing::debug!(generation, "Dropping stale voice capture");
                return;
            }
            state.current = RecordingState::Idle;
            state.generation += 1;
        }
        self.events
            .emit(SessionEvent::RecordingStopped { cancelled: false });
        self.deliver(self.placeholder_transcript.clone());
    }

    fn deliver(&self, text: String) {
        self.events
            .emit(SessionEvent::TranscriptCaptured { text: text.clone() });
        (self.sink)(text);
    }
}

// =============================================================================
// Tests
// =============================================================================
