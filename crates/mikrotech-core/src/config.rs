//! Configuration sources
//!
//! Settings are layered from optional files under `config/` and the process
//! environment. Transport crates deserialize their own settings struct from
//! the result.

use config::{Config, ConfigError, Environment, File};

/// Build the layered configuration.
///
/// Sources, lowest priority first:
/// `config/default`, `config/{RUN_MODE}`, `config/local`, `APP__*` variables,
/// then plain environment variables (`TELEGRAM_BOT_TOKEN` becomes `telegram_bot_token`).
///
/// # Errors
///
/// Returns a `ConfigError` if a present file cannot be parsed.
pub fn build_config() -> Result<Config, ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        // Not checked into git
        .add_source(File::with_name("config/local").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        // Empty variables count as unset
        .add_source(Environment::default().ignore_empty(true))
        .build()
}
