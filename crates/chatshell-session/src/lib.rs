//! Chatshell session crate - conversation state, simulated replies and voice capture.
//!
//! [`ChatSession`] is the entry point. It owns the conversation log, the
//! session settings, the reply simulator and the voice capture stub, and
//! wires captured voice text into the same send path as typed input.
//! Delayed work runs on Tokio timers and is cancelled by generation tokens.

pub mod bus;
pub mod catalog;
pub mod id;
pub mod platform;
pub mod session;
pub mod settings;
pub mod simulator;
pub mod store;
pub mod voice;

pub use bus::EventBus;
pub use catalog::ResponseCatalog;
pub use id::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use platform::{LoggingSpeech, PlatformProbe, SpeechOutput, StaticPlatform};
pub use session::ChatSession;
pub use settings::SessionSettings;
pub use simulator::{ResponseSimulator, ResponseState, SendOutcome};
pub use store::{ConversationStore, Delivery, PendingTicket};
pub use voice::{RecordingState, TranscriptSink, VoiceCaptureStub, VoiceOutcome};
