/// Dispatcher endpoints translating Telegram updates into conversation events
pub mod handlers;
/// `Messenger` implementation backed by the Bot API
pub mod messenger;
/// Conversion of conversation keyboards into Telegram markup
pub mod views;

pub use messenger::TelegramMessenger;

/// Conversation engine wired to Telegram.
pub type Engine = mikrotech_core::ConversationEngine<TelegramMessenger>;
