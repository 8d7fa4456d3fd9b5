//! Simulated assistant replies.
//!
//! Lifecycle of one reply:
//! - Idle -> Pending (non-blank send: user message appended, timer spawned)
//! - Pending -> Delivered (timer fired, ticket still valid, reply appended)
//! - Pending -> Cancelled (clear/cancel invalidated the ticket; the timer still
//!   fires but its completion is dropped)
//!
//! Several replies may be pending at once. Each non-blank send gets exactly
//! one reply and the session stays loading until the last one lands.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chatshell_core::config::ResponseConfig;
use chatshell_core::{Message, MessageId, Mode, Role, SessionEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bus::EventBus;
use crate::catalog::ResponseCatalog;
use crate::id::{IdGenerator, UuidIdGenerator};
use crate::platform::{LoggingSpeech, PlatformProbe, SpeechOutput, StaticPlatform};
use crate::settings::SessionSettings;
use crate::store::{ConversationStore, Delivery, PendingTicket};

/// Default lower bound of the reply delay.
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(1000);
/// Default width of the reply delay window.
pub const DEFAULT_DELAY_SPAN: Duration = Duration::from_millis(1500);

/// Observable state of the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseState {
    Idle,
    Pending { in_flight: usize },
}

/// Result of [`ResponseSimulator::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing was appended or scheduled.
    Ignored,
    /// The user message was appended and a reply is on its way.
    Scheduled {
        message_id: MessageId,
        mode: Mode,
        delay: Duration,
    },
}

impl SendOutcome {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, SendOutcome::Scheduled { .. })
    }
}

/// Turns user input into delayed canned replies.
pub struct ResponseSimulator {
    store: Arc<ConversationStore>,
    settings: Arc<SessionSettings>,
    catalog: ResponseCatalog,
    events: EventBus,
    ids: Arc<dyn IdGenerator>,
    rng: Mutex<StdRng>,
    min_delay: Duration,
    delay_span: Duration,
    speech: Arc<dyn SpeechOutput>,
    platform: Arc<dyn PlatformProbe>,
}

impl std::fmt::Debug for ResponseSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseSimulator")
            .field("store", &self.store)
            .field("settings", &self.settings)
            .field("min_delay", &self.min_delay)
            .field("delay_span", &self.delay_span)
            .finish()
    }
}

impl ResponseSimulator {
    /// Create a simulator with default delays, an entropy-seeded RNG, UUID
    /// message ids, logging speech and a platform that supports audio.
    pub fn new(
        store: Arc<ConversationStore>,
        settings: Arc<SessionSettings>,
        catalog: ResponseCatalog,
        events: EventBus,
    ) -> Self {
        Self {
            store,
            settings,
            catalog,
            events,
            ids: Arc::new(UuidIdGenerator),
            rng: Mutex::new(StdRng::from_os_rng()),
            min_delay: DEFAULT_MIN_DELAY,
            delay_span: DEFAULT_DELAY_SPAN,
            speech: Arc::new(LoggingSpeech),
            platform: Arc::new(StaticPlatform::default()),
        }
    }

    /// Apply delays and seed from the `[responses]` config section.
    pub fn with_config(self, config: &ResponseConfig) -> Self {
        let this = self.with_delays(
            Duration::from_millis(config.min_delay_ms),
            Duration::from_millis(config.delay_span_ms),
        );
        match config.seed {
            Some(seed) => this.with_seed(seed),
            None => this,
        }
    }

    pub fn with_delays(mut self, min_delay: Duration, delay_span: Duration) -> Self {
        self.min_delay = min_delay;
        self.delay_span = delay_span;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_speech(mut self, speech: Arc<dyn SpeechOutput>) -> Self {
        self.speech = speech;
        self
    }

    pub fn with_platform(mut self, platform: Arc<dyn PlatformProbe>) -> Self {
        self.platform = platform;
        self
    }

    pub fn catalog(&self) -> &ResponseCatalog {
        &self.catalog
    }

    pub fn state(&self) -> ResponseState {
        match self.store.pending() {
            0 => ResponseState::Idle,
            in_flight => ResponseState::Pending { in_flight },
        }
    }

    /// Draw a delay and a reply for `mode` from the injected RNG.
    fn draw(&self, mode: Mode) -> (Duration, String) {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let span_ms = self.delay_span.as_millis() as u64;
        let jitter = if span_ms == 0 {
            0
        } else {
            rng.random_range(0..span_ms)
        };
        let reply = self.catalog.pick(mode, &mut *rng).to_string();
        (self.min_delay + Duration::from_millis(jitter), reply)
    }

    /// Accept user input and schedule a reply.
    ///
    /// Blank or whitespace-only input is ignored. The reply is drawn from the
    /// catalog of the mode active at send time. Returns immediately.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn send(self: &Arc<Self>, content: &str) -> SendOutcome {
        let content = content.trim();
        if content.is_empty() {
            tracing::debug!("Ignoring blank input");
            return SendOutcome::Ignored;
        }

        let user_message = Message::new(self.ids.next_id(), Role::User, content);
        let message_id = user_message.id.clone();
        let ticket = self.store.begin_response(user_message.clone());
        self.events.emit(SessionEvent::MessageAppended {
            message: user_message,
        });
        if ticket.in_flight == 1 {
            self.events
                .emit(SessionEvent::LoadingChanged { is_loading: true });
        }

        let mode = self.settings.active_mode();
        let (delay, reply) = self.draw(mode);
        tracing::info!(
            message_id = %message_id,
            mode = %mode,
            delay_ms = delay.as_millis() as u64,
            "Reply scheduled"
        );

        let this = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            this.deliver(ticket, reply);
        });

        SendOutcome::Scheduled {
            message_id,
            mode,
            delay,
        }
    }

    /// Timer completion: append the reply if the ticket is still valid.
    fn deliver(&self, ticket: PendingTicket, reply: String) {
        let delivery = self.store.complete_response(ticket, || {
            Message::new(self.ids.next_id(), Role::Assistant, reply)
        });
        match delivery {
            Delivery::Stale { current_generation } => {
                tracing::debug!(
                    ticket_generation = ticket.generation,
                    current_generation,
                    "Dropping stale reply"
                );
                self.events.emit(SessionEvent::StaleCompletionDropped {
                    generation: ticket.generation,
                });
            }
            Delivery::Delivered {
                message,
                still_loading,
            } => {
                tracing::debug!(message_id = %message.id, "Reply delivered");
                let text = message.content.clone();
                self.events.emit(SessionEvent::MessageAppended { message });
                if !still_loading {
                    self.events
                        .emit(SessionEvent::LoadingChanged { is_loading: false });
                }
                if self.settings.voice_enabled() && self.platform.supports_audio_output() {
                    self.speak(&text);
                }
            }
        }
    }

    /// Fire-and-forget speech. Failures are logged and swallowed.
    pub fn speak(&self, text: &str) {
        if let Err(e) = self.speech.speak(text, self.settings.language()) {
            tracing::warn!(error = %e, "Speech output failed");
        }
    }

    /// Abandon every pending reply. Returns how many were abandoned.
    pub fn cancel(&self) -> usize {
        let abandoned = self.store.invalidate_pending();
        if abandoned > 0 {
            tracing::info!(abandoned, "Pending replies cancelled");
            self.events
                .emit(SessionEvent::LoadingChanged { is_loading: false });
        }
        abandoned
    }
}

// =============================================================================
// Tests
// =============================================================================
