//! # Outbound Ports
//!
//! Delivery of ledger events to observers.

use crate::domain::LedgerEvent;

/// Event sink - outbound port.
///
/// Called once per emitted event, in emission order, after the operation
/// has been applied.
pub trait EventSink: Send + Sync {
    /// Deliver an event. Returns the number of observers reached.
    fn publish(&self, event: &LedgerEvent) -> usize;
}

// =============================================================================
// No-op Implementation
// =============================================================================

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn publish(&self, _event: &LedgerEvent) -> usize {
        0
    }
}

impl<S: EventSink + ?Sized> EventSink for std::sync::Arc<S> {
    fn publish(&self, event: &LedgerEvent) -> usize {
        (**self).publish(event)
    }
}
