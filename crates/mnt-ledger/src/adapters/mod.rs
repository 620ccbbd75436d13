//! # Adapters
//!
//! Event-sink implementations.

pub mod broadcast;
pub mod event_log;

pub use self::broadcast::{BroadcastEventSink, DEFAULT_CHANNEL_CAPACITY};
pub use event_log::InMemoryEventLog;
