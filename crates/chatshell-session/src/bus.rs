//! Broadcast channel carrying [`SessionEvent`]s to the rendering layer.

use chatshell_core::SessionEvent;
use tokio::sync::broadcast;

/// Default number of events buffered per subscriber.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Cheaply cloneable event publisher.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SessionEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn emit(&self, event: SessionEvent) {
        tracing::trace!(event = event.kind(), "Session event");
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_events_in_order() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.emit(SessionEvent::RecordingStarted);
        bus.emit(SessionEvent::RecordingStopped { cancelled: false });

        assert_eq!(rx.recv().await.unwrap(), SessionEvent::RecordingStarted);
        assert_eq!(
            rx.recv().await.unwrap(),
            SessionEvent::RecordingStopped { cancelled: false }
        );
    }

    #[test]
    fn test_emit_without_subscribers_is_fine() {
        let bus = EventBus::new(4);
        bus.emit(SessionEvent::LoadingChanged { is_loading: true });
    }
}
