#![deny(missing_docs)]
//! Telegram transport adapter for the MikroTech Academy bot.

/// Telegram-specific handlers, messenger and views.
pub mod bot;
/// Telegram transport configuration.
pub mod config;
/// Telegram runtime entrypoint.
pub mod runner;
