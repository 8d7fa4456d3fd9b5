//! Message identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};

use chatshell_core::MessageId;

/// Produces unique message identifiers.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> MessageId;
}

/// Random UUID v4 identifiers. The default for running sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> MessageId {
        MessageId::new()
    }
}

/// Predictable `msg-1`, `msg-2`, ... identifiers.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> MessageId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        MessageId(format!("msg-{}", n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_ids_are_unique() {
        let generator = UuidIdGenerator;
        let ids: HashSet<_> = (0..100).map(|_| generator.next_id()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_sequential_ids() {
        let generator = SequentialIdGenerator::new();
        assert_eq!(generator.next_id().as_str(), "msg-1");
        assert_eq!(generator.next_id().as_str(), "msg-2");
        assert_eq!(generator.next_id().as_str(), "msg-3");
    }

    #[test]
    fn test_sequential_ids_shared_across_threads() {
        let generator = std::sync::Arc::new(SequentialIdGenerator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = std::sync::Arc::clone(&generator);
                std::thread::spawn(move || (0..25).map(|_| generator.next_id()).collect::<Vec<_>>())
            })
            .collect();
        let all: HashSet<_> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(all.len(), 100);
    }
}
