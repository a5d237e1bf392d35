//! Inbound events as seen by the state machine
//!
//! Platform updates are translated into these types at the transport boundary.

use super::action::Action;

/// The person talking to the bot, as reported by the platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    /// Platform user id; also the session key.
    pub id: i64,
    /// First name shown in admin notifications.
    pub first_name: String,
}

/// Location of a message on the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageRef {
    /// Chat the message lives in.
    pub chat_id: i64,
    /// Message id within the chat.
    pub message_id: i32,
}

/// What an inbound message carries
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    /// Plain text
    Text(String),
    /// Image, with or without caption
    Photo,
    /// Any file
    Document,
    /// Stickers, voice notes and everything else
    Other,
}

impl Content {
    /// Text payload, if this is a text message.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A free-form message sent by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inbound {
    /// Where the message is, for forwarding.
    pub source: MessageRef,
    /// Message content.
    pub content: Content,
}

/// Anything the user can do
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// `/start` command
    Start,
    /// `/cancel` command
    Cancel,
    /// Inline button press
    Button(Action),
    /// Any other message
    Message(Inbound),
}
