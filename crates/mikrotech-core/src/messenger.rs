//! Outbound messaging
//!
//! The engine talks to the chat platform only through [`Messenger`]. The
//! admin destination is part of the implementation, not of the calls.

use crate::conversation::{MessageRef, Reply};
use thiserror::Error;

/// Errors reported by a messenger implementation
#[derive(Debug, Error)]
pub enum MessengerError {
    /// The platform rejected or failed the request
    #[error("Platform error: {0}")]
    Platform(String),
}

/// Capabilities the conversation needs from the chat platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Messenger: Send + Sync {
    /// Send `reply` as a new message to `chat_id`.
    async fn send(&self, chat_id: i64, reply: &Reply) -> Result<(), MessengerError>;

    /// Replace the content of an existing message with `reply`.
    async fn edit(&self, target: MessageRef, reply: &Reply) -> Result<(), MessengerError>;

    /// Send an HTML notification to the admin destination.
    async fn notify_admin(&self, text: &str) -> Result<(), MessengerError>;

    /// Forward a user's message verbatim to the admin destination.
    async fn forward_to_admin(&self, source: MessageRef) -> Result<(), MessengerError>;
}
