//! Conversation log and loading flag.
//!
//! The store is the only owner of the message list. Pending replies are
//! tracked with a generation counter: each scheduled reply holds a
//! [`PendingTicket`] stamped with the generation current at schedule time,
//! and a completion whose ticket no longer matches is dropped. Check and
//! append happen under the same lock.

use std::sync::{Mutex, MutexGuard};

use chatshell_core::Message;

/// Validity token handed out when a reply is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTicket {
    pub generation: u64,
    /// Replies in flight, this one included, when the ticket was issued.
    pub in_flight: usize,
}

/// Outcome of [`ConversationStore::complete_response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The reply was appended; `message` is a copy of it.
    Delivered {
        message: Message,
        still_loading: bool,
    },
    /// The ticket's generation was invalidated; nothing changed.
    Stale { current_generation: u64 },
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered { .. })
    }
}

#[derive(Debug, Default)]
struct ConversationState {
    messages: Vec<Message>,
    generation: u64,
    pending: usize,
}

impl ConversationState {
    fn is_loading(&self) -> bool {
        self.pending > 0
    }
}

/// Thread-safe, in-memory conversation log.
#[derive(Debug, Default)]
pub struct ConversationStore {
    state: Mutex<ConversationState>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ConversationState> {
        // Every mutation is a single push or reset, so a poisoned guard still
        // holds a consistent state.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append a message to the end of the log.
    pub fn append(&self, message: Message) {
        self.lock().messages.push(message);
    }

    /// Append the user's message and register one pending reply.
    pub fn begin_response(&self, user_message: Message) -> PendingTicket {
        let mut state = self.lock();
        state.messages.push(user_message);
        state.pending += 1;
        tracing::debug!(
            generation = state.generation,
            pending = state.pending,
            "Reply pending"
        );
        PendingTicket {
            generation: state.generation,
            in_flight: state.pending,
        }
    }

    /// Deliver a reply for `ticket`.
    ///
    /// `build` runs only once the ticket is known to be valid, under the same
    /// lock as the append. Returns `Delivery::Stale` and leaves the state
    /// untouched if the ticket was invalidated by a clear or cancel since it
    /// was issued.
    pub fn complete_response<F>(&self, ticket: PendingTicket, build: F) -> Delivery
    where
        F: FnOnce() -> Message,
    {
        let mut state = self.lock();
        if ticket.generation != state.generation {
            return Delivery::Stale {
                current_generation: state.generation,
            };
        }
        let message = build();
        state.messages.push(message.clone());
        state.pending = state.pending.saturating_sub(1);
        Delivery::Delivered {
            message,
            still_loading: state.is_loading(),
        }
    }

    /// Invalidate every outstanding ticket and clear the loading flag.
    ///
    /// Returns the number of replies that were abandoned.
    pub fn invalidate_pending(&self) -> usize {
        let mut state = self.lock();
        state.generation += 1;
        std::mem::take(&mut state.pending)
    }

    /// Empty the log and abandon pending replies.
    ///
    /// Returns the number of replies that were abandoned.
    pub fn clear(&self) -> usize {
        let mut state = self.lock();
        state.messages.clear();
        state.generation += 1;
        std::mem::take(&mut state.pending)
    }

    /// Snapshot of the log in insertion order.
    pub fn messages(&self) -> Vec<Message> {
        self.lock().messages.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading()
    }

    pub fn pending(&self) -> usize {
        self.lock().pending
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    pub fn len(&self) -> usize {
        self.lock().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().messages.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
