//! Menu conversation state machine
//!
//! A session moves through the menu tree one event at a time. [`transition`]
//! is pure: it takes the current session and an event and returns the next
//! session (or the end of the conversation) plus the effects to perform.

/// Typed button payloads.
pub mod action;
/// Effects produced by transitions.
pub mod effect;
/// Inbound events.
pub mod event;
/// Session state.
pub mod state;
mod transition;
/// Message texts and menus.
pub mod view;

pub use action::{Action, ActionParseError, Service, TutorOption};
pub use effect::{Button, Effect, Keyboard, Reply};
pub use event::{Content, Event, Inbound, MessageRef, User};
pub use state::{RequestOrigin, Session, State};
pub use transition::{transition, Next, Transition};
