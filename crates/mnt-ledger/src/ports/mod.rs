//! # Ports
//!
//! Inbound API trait and outbound event-delivery trait.

pub mod inbound;
pub mod outbound;

pub use inbound::TokenLedgerApi;
pub use outbound::{EventSink, NullEventSink};
