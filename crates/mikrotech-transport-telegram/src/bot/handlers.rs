//! Update handlers
//!
//! Translate Telegram updates into conversation events and hand them to the
//! engine. Dispatcher wiring lives in the runner.

use anyhow::Result;
use mikrotech_core::conversation::{Action, Content, Event, Inbound, MessageRef, User};
use mikrotech_core::engine::Incoming;
use mikrotech_core::{ConversationEngine, Messenger};
use std::sync::Arc;
use teloxide::{prelude::*, types::CallbackQuery, utils::command::BotCommands};
use tracing::{info, warn};

/// Supported commands for the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Start or restart the conversation
    #[command(description = "Start over.")]
    Start,
    /// Abort the current conversation
    #[command(description = "Cancel the current request.")]
    Cancel,
}

impl From<Command> for Event {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Start => Self::Start,
            Command::Cancel => Self::Cancel,
        }
    }
}

// Helper function to get the conversation user from a Telegram user
fn to_user(user: &teloxide::types::User) -> User {
    User {
        id: user.id.0.cast_signed(),
        first_name: user.first_name.clone(),
    }
}

/// Classify what a message carries.
#[must_use]
pub fn message_content(msg: &Message) -> Content {
    if let Some(text) = msg.text() {
        Content::Text(text.to_string())
    } else if msg.photo().is_some() {
        Content::Photo
    } else if msg.document().is_some() {
        Content::Document
    } else {
        Content::Other
    }
}

/// Command handler
///
/// # Errors
///
/// Returns an error if the reply cannot be delivered.
pub async fn command<M: Messenger>(
    msg: Message,
    cmd: Command,
    engine: Arc<ConversationEngine<M>>,
) -> Result<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let user = to_user(from);
    info!("User {} ({}) sent /{cmd:?}.", user.id, user.first_name);

    engine
        .handle(Incoming {
            user,
            chat_id: msg.chat.id.0,
            pressed: None,
            event: cmd.into(),
        })
        .await?;
    Ok(())
}

/// Inline button handler
///
/// The query is always answered so the client stops its spinner, even when the
/// payload is not understood. A failed answer does not stop the press from
/// being handled.
///
/// # Errors
///
/// Returns an error if the reply cannot be delivered.
pub async fn callback<M: Messenger>(
    bot: Bot,
    q: CallbackQuery,
    engine: Arc<ConversationEngine<M>>,
) -> Result<()> {
    let user = to_user(&q.from);
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!("Failed to answer callback query from user {}: {}", user.id, e);
    }

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    let action = match data.parse::<Action>() {
        Ok(action) => action,
        Err(e) => {
            warn!("Ignoring callback from user {}: {e}", user.id);
            return Ok(());
        }
    };

    let pressed = q.message.as_ref().map(|m| MessageRef {
        chat_id: m.chat().id.0,
        message_id: m.id().0,
    });
    let chat_id = pressed.map_or(user.id, |p| p.chat_id);

    engine
        .handle(Incoming {
            user,
            chat_id,
            pressed,
            event: Event::Button(action),
        })
        .await?;
    Ok(())
}

/// Free-form message handler
///
/// # Errors
///
/// Returns an error if the reply or admin relay cannot be delivered.
pub async fn message<M: Messenger>(
    msg: Message,
    engine: Arc<ConversationEngine<M>>,
) -> Result<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };

    engine
        .handle(Incoming {
            user: to_user(from),
            chat_id: msg.chat.id.0,
            pressed: None,
            event: Event::Message(Inbound {
                source: MessageRef {
                    chat_id: msg.chat.id.0,
                    message_id: msg.id.0,
                },
                content: message_content(&msg),
            }),
        })
        .await?;
    Ok(())
}
