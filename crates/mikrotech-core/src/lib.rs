#![deny(missing_docs)]
//! MikroTech Academy bot core library.
//!
//! Transport-agnostic conversation logic: the static country and rate tables,
//! price rounding, the menu state machine and the per-user session store.

/// Static country table.
pub mod catalog;
/// Configuration source assembly.
pub mod config;
/// Conversation state machine (states, events, effects, transitions).
pub mod conversation;
/// Engine that runs transitions and applies their effects.
pub mod engine;
/// Outbound messaging abstraction.
pub mod messenger;
/// Currency conversion and display rounding.
pub mod pricing;
/// In-memory session store.
pub mod session;

#[cfg(test)]
pub mod testing;

pub use engine::ConversationEngine;
pub use messenger::{Messenger, MessengerError};
pub use session::SessionStore;
