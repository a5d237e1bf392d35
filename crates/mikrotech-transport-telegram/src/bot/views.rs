//! View layer for bot UI components
//!
//! Converts transport-agnostic keyboards into Telegram markup.

use mikrotech_core::conversation::Keyboard;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Inline keyboard for `keyboard`, one callback button per conversation button.
#[must_use]
pub fn inline_keyboard(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|button| {
                InlineKeyboardButton::callback(button.label.clone(), button.action.to_string())
            })
            .collect::<Vec<_>>()
    }))
}
