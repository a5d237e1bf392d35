//! Bot API implementation of the conversation messenger.
//!
//! Every text is sent with HTML parse mode. Failures are returned as
//! [`MessengerError`] without retrying.

use crate::bot::views::inline_keyboard;
use async_trait::async_trait;
use mikrotech_core::conversation::{MessageRef, Reply};
use mikrotech_core::{Messenger, MessengerError};
use teloxide::prelude::*;
use teloxide::types::{ChatId, KeyboardRemove, MessageId, ParseMode, Recipient};
use tracing::debug;

const ERROR_NOT_MODIFIED: &str = "message is not modified";

/// Messenger sending through a teloxide [`Bot`].
pub struct TelegramMessenger {
    bot: Bot,
    admin: Recipient,
}

impl TelegramMessenger {
    /// Create a messenger relaying admin traffic to `admin`.
    pub const fn new(bot: Bot, admin: Recipient) -> Self {
        Self { bot, admin }
    }
}

fn platform_error(action: &str, e: &teloxide::RequestError) -> MessengerError {
    MessengerError::Platform(format!("Telegram {action} error: {e}"))
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, chat_id: i64, reply: &Reply) -> Result<(), MessengerError> {
        let mut req = self
            .bot
            .send_message(ChatId(chat_id), reply.text.clone())
            .parse_mode(ParseMode::Html);
        if let Some(keyboard) = &reply.keyboard {
            req = req.reply_markup(inline_keyboard(keyboard));
        } else if reply.remove_keyboard {
            req = req.reply_markup(KeyboardRemove::new());
        }
        req.await
            .map(|_| ())
            .map_err(|e| platform_error("send", &e))
    }

    async fn edit(&self, target: MessageRef, reply: &Reply) -> Result<(), MessengerError> {
        let mut req = self
            .bot
            .edit_message_text(
                ChatId(target.chat_id),
                MessageId(target.message_id),
                reply.text.clone(),
            )
            .parse_mode(ParseMode::Html);
        if let Some(keyboard) = &reply.keyboard {
            req = req.reply_markup(inline_keyboard(keyboard));
        }
        match req.await {
            Ok(_) => Ok(()),
            Err(e) if e.to_string().contains(ERROR_NOT_MODIFIED) => {
                debug!("Message update skipped: message is not modified");
                Ok(())
            }
            Err(e) => Err(platform_error("edit", &e)),
        }
    }

    async fn notify_admin(&self, text: &str) -> Result<(), MessengerError> {
        self.bot
            .send_message(self.admin.clone(), text)
            .parse_mode(ParseMode::Html)
            .await
            .map(|_| ())
            .map_err(|e| platform_error("admin notification", &e))
    }

    async fn forward_to_admin(&self, source: MessageRef) -> Result<(), MessengerError> {
        self.bot
            .forward_message(
                self.admin.clone(),
                ChatId(source.chat_id),
                MessageId(source.message_id),
            )
            .await
            .map(|_| ())
            .map_err(|e| platform_error("forward", &e))
    }
}
