//! Effects produced by transitions

use super::action::Action;
use super::event::MessageRef;

/// Inline keyboard button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    /// Text on the button.
    pub label: String,
    /// Action sent back when pressed.
    pub action: Action,
}

impl Button {
    /// Create a button.
    #[must_use]
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Inline keyboard attached under a message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keyboard {
    /// Button rows, top to bottom.
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// Keyboard from button rows.
    #[must_use]
    pub const fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    /// Every button, row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}

/// Message shown to the user. Text is HTML.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reply {
    /// HTML body.
    pub text: String,
    /// Buttons under the message.
    pub keyboard: Option<Keyboard>,
    /// Ask the client to hide any reply keyboard.
    pub remove_keyboard: bool,
}

impl Reply {
    /// Plain reply without buttons.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Attach an inline keyboard.
    #[must_use]
    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    /// Hide the reply keyboard when shown.
    #[must_use]
    pub fn removing_keyboard(mut self) -> Self {
        self.remove_keyboard = true;
        self
    }
}

/// Effects to be executed after a transition, in order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Answer the user. Edits the pressed message for button events, sends otherwise.
    Reply(Reply),
    /// Send an HTML notification to the admin destination
    NotifyAdmin(String),
    /// Forward the user's original message to the admin destination
    ForwardToAdmin(MessageRef),
}
