//! Telegram transport settings.

use config::ConfigError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use teloxide::types::{ChatId, Recipient};

/// Address the webhook listener binds to when none is configured.
pub const DEFAULT_WEBHOOK_ADDR: &str = "0.0.0.0:8443";

/// Telegram transport settings loaded from environment variables.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramSettings {
    /// Telegram Bot API token (`TELEGRAM_BOT_TOKEN`).
    pub telegram_bot_token: String,
    /// Where requests are relayed: a numeric chat id or an `@channel` name (`ADMIN_CLIENT_ID`).
    pub admin_client_id: String,
    /// Public HTTPS URL for webhook mode (`WEBHOOK_URL`). Long polling when unset.
    pub webhook_url: Option<String>,
    /// Local listen address for webhook mode (`WEBHOOK_ADDR`).
    pub webhook_addr: Option<String>,
}

/// Resolved webhook endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSettings {
    /// Local address the HTTP listener binds to.
    pub addr: SocketAddr,
    /// Public URL registered with Telegram.
    pub url: Url,
}

impl TelegramSettings {
    /// Create new settings by loading from environment and files.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails, if the token or admin
    /// destination is missing, or if the webhook settings are malformed.
    pub fn new() -> Result<Self, ConfigError> {
        let settings: Self = mikrotech_core::config::build_config()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check required values and parse everything that has to parse.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.telegram_bot_token.trim().is_empty() {
            return Err(ConfigError::NotFound("telegram_bot_token".to_string()));
        }
        self.admin_recipient()?;
        self.webhook()?;
        Ok(())
    }

    /// Admin destination as a Bot API recipient.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the value is empty or neither a chat id nor
    /// an `@username`.
    pub fn admin_recipient(&self) -> Result<Recipient, ConfigError> {
        let raw = self.admin_client_id.trim();
        if raw.is_empty() {
            return Err(ConfigError::NotFound("admin_client_id".to_string()));
        }
        if let Ok(id) = raw.parse::<i64>() {
            return Ok(Recipient::Id(ChatId(id)));
        }
        if raw.len() > 1 && raw.starts_with('@') {
            return Ok(Recipient::ChannelUsername(raw.to_string()));
        }
        Err(ConfigError::Message(format!(
            "admin_client_id must be a numeric chat id or an @username, got '{raw}'"
        )))
    }

    /// Webhook endpoint, or `None` for long polling.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the URL or listen address cannot be parsed.
    pub fn webhook(&self) -> Result<Option<WebhookSettings>, ConfigError> {
        let Some(url) = self.webhook_url.as_deref().map(str::trim).filter(|u| !u.is_empty())
        else {
            return Ok(None);
        };
        let url = Url::parse(url)
            .map_err(|e| ConfigError::Message(format!("invalid webhook_url '{url}': {e}")))?;

        let addr = self
            .webhook_addr
            .as_deref()
            .unwrap_or(DEFAULT_WEBHOOK_ADDR);
        let addr = addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Message(format!("invalid webhook_addr '{addr}': {e}")))?;

        Ok(Some(WebhookSettings { addr, url }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(admin: &str) -> TelegramSettings {
        TelegramSettings {
            telegram_bot_token: "123456789:dummy".to_string(),
            admin_client_id: admin.to_string(),
            ..TelegramSettings::default()
        }
    }

    #[test]
    fn test_admin_recipient_parsing() {
        assert_eq!(
            settings("123456").admin_recipient().ok(),
            Some(Recipient::Id(ChatId(123_456)))
        );
        // Supergroup ids are negative
        assert_eq!(
            settings(" -1001234567890 ").admin_recipient().ok(),
            Some(Recipient::Id(ChatId(-1_001_234_567_890)))
        );
        assert_eq!(
            settings("@academy_admins").admin_recipient().ok(),
            Some(Recipient::ChannelUsername("@academy_admins".to_string()))
        );
        assert!(settings("").admin_recipient().is_err());
        assert!(settings("@").admin_recipient().is_err());
        assert!(settings("admin").admin_recipient().is_err());
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let mut s = settings("1");
        s.telegram_bot_token = "  ".to_string();
        assert!(s.validate().is_err());
        assert!(settings("1").validate().is_ok());
    }

    #[test]
    fn test_webhook_defaults_to_polling() {
        assert_eq!(settings("1").webhook().ok(), Some(None));

        let mut s = settings("1");
        s.webhook_url = Some(String::new());
        assert_eq!(s.webhook().ok(), Some(None));
    }

    #[test]
    fn test_webhook_settings() {
        let mut s = settings("1");
        s.webhook_url = Some("https://bot.example.com/telegram".to_string());
        let hook = s
            .webhook()
            .expect("valid webhook")
            .expect("webhook mode");
        assert_eq!(hook.addr.port(), 8443);
        assert_eq!(hook.url.path(), "/telegram");

        s.webhook_addr = Some("127.0.0.1:9000".to_string());
        let hook = s
            .webhook()
            .expect("valid webhook")
            .expect("webhook mode");
        assert_eq!(hook.addr.port(), 9000);

        s.webhook_addr = Some("not an address".to_string());
        assert!(s.webhook().is_err());
        s.webhook_url = Some("::".to_string());
        assert!(s.webhook().is_err());
    }
}
