//! Dispatcher setup and startup modes
//!
//! Builds the update tree, injects the conversation engine and runs either
//! long polling or the webhook listener.

use crate::bot::{self, handlers::Command, Engine, TelegramMessenger};
use crate::config::TelegramSettings;
use anyhow::Result;
use mikrotech_core::ConversationEngine;
use std::sync::Arc;
use teloxide::dispatching::{DefaultKey, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use teloxide::update_listeners::webhooks;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};

/// Run the Telegram transport runtime.
///
/// Uses a webhook listener when one is configured and long polling otherwise.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the webhook cannot be set up.
pub async fn run_bot(settings: Arc<TelegramSettings>) -> Result<()> {
    let bot = Bot::new(settings.telegram_bot_token.clone());
    let engine = init_engine(&bot, &settings)?;

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register bot commands: {}", e);
    }

    let webhook = settings.webhook()?;
    let mut dispatcher = build_dispatcher(bot.clone(), engine);

    if let Some(hook) = webhook {
        info!("Bot is running via webhook on {} ({})", hook.addr, hook.url);
        let listener = webhooks::axum(bot, webhooks::Options::new(hook.addr, hook.url)).await?;
        dispatcher
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("An error from the update listener"),
            )
            .await;
    } else {
        info!("Bot is running via long polling...");
        dispatcher.dispatch().await;
    }

    info!("Bot stopped.");
    Ok(())
}

fn init_engine(bot: &Bot, settings: &TelegramSettings) -> Result<Arc<Engine>> {
    let admin = settings.admin_recipient()?;
    info!("Relaying requests to {:?}", admin);
    let messenger = TelegramMessenger::new(bot.clone(), admin);
    Ok(Arc::new(ConversationEngine::new(messenger)))
}

fn build_dispatcher(
    bot: Bot,
    engine: Arc<Engine>,
) -> Dispatcher<Bot, teloxide::RequestError, DefaultKey> {
    Dispatcher::builder(bot, setup_handler())
        .dependencies(dptree::deps![engine])
        .enable_ctrlc_handler()
        .build()
}

fn setup_handler() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handle_callback))
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_command),
                )
                .branch(dptree::endpoint(handle_message)),
        )
}

async fn handle_command(
    msg: Message,
    cmd: Command,
    engine: Arc<Engine>,
) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::handlers::command(msg, cmd, engine).await {
        error!("Command error: {}", e);
    }
    respond(())
}

async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    engine: Arc<Engine>,
) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::handlers::callback(bot, q, engine).await {
        error!("Callback error: {}", e);
    }
    respond(())
}

async fn handle_message(msg: Message, engine: Arc<Engine>) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::handlers::message(msg, engine).await {
        error!("Message handling error: {}", e);
    }
    respond(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dispatcher_builds_with_engine_only() {
        let settings = TelegramSettings {
            telegram_bot_token: "123456789:dummy".to_string(),
            admin_client_id: "-1001234567890".to_string(),
            ..TelegramSettings::default()
        };
        let bot = Bot::new(settings.telegram_bot_token.clone());
        let engine = init_engine(&bot, &settings).expect("engine from valid settings");

        // Building checks every endpoint's parameters against the injected dependencies
        let _dispatcher = build_dispatcher(bot, engine);
    }
}
