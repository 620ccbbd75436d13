//! Append-only in-memory event log.
//!
//! Keeps every event for the life of the log with no capacity limit. Meant
//! for tests and inspection; long-running observers should subscribe to a
//! [`BroadcastEventSink`](super::BroadcastEventSink) instead.

use crate::domain::LedgerEvent;
use crate::ports::EventSink;
use parking_lot::RwLock;

/// Records every published event in order.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    events: RwLock<Vec<LedgerEvent>>,
}

impl InMemoryEventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events.read().clone()
    }

    /// Most recent event.
    #[must_use]
    pub fn last(&self) -> Option<LedgerEvent> {
        self.events.read().last().cloned()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.events.write().clear();
    }
}

impl EventSink for InMemoryEventLog {
    fn publish(&self, event: &LedgerEvent) -> usize {
        self.events.write().push(event.clone());
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, U256};

    fn approval(amount: u64) -> LedgerEvent {
        LedgerEvent::Approval {
            owner: Address::repeat_byte(1),
            delegate: Address::repeat_byte(2),
            amount: U256::from(amount),
        }
    }

    #[test]
    fn test_records_in_order() {
        let log = InMemoryEventLog::new();
        assert!(log.is_empty());

        log.publish(&approval(1));
        log.publish(&approval(2));

        assert_eq!(log.len(), 2);
        assert_eq!(log.events(), vec![approval(1), approval(2)]);
        assert_eq!(log.last(), Some(approval(2)));

        log.clear();
        assert!(log.is_empty());
    }
}
