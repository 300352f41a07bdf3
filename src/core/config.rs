//! Runtime configuration
//!
//! Everything is read once at startup into an explicit [`Config`] value that
//! is passed down to the store, the platform client and the web server.
//! Nothing here is process-wide state.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use teloxide::types::ChatId;

use crate::core::error::{AppError, AppResult};

/// Channel the bot indexes when SOURCE_CHANNEL_ID is not set
pub const DEFAULT_SOURCE_CHANNEL_ID: i64 = -1003370713141;

/// Flat-file store used when DB_PATH is not set
pub const DEFAULT_DB_PATH: &str = "video_db.json";

/// Log file used when LOG_FILE_PATH is not set
pub const DEFAULT_LOG_FILE_PATH: &str = "app.log";

/// Menu configuration
pub mod menu {
    /// Number of media buttons per menu page
    pub const DEFAULT_PAGE_SIZE: usize = 6;
}

/// HTTP server configuration
pub mod server {
    /// Port the webhook server listens on when PORT is not set
    pub const DEFAULT_PORT: u16 = 8080;
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Bot configuration assembled from the environment.
#[derive(Debug)]
pub struct Config {
    /// Bot token, read from BOT_TOKEN or TELOXIDE_TOKEN
    pub bot_token: SecretString,
    /// Externally reachable webhook URL, read from WEBHOOK_URL
    pub webhook_url: Option<url::Url>,
    /// Listen port, read from PORT
    pub port: u16,
    /// Only posts from this chat are indexed, read from SOURCE_CHANNEL_ID
    pub source_channel_id: ChatId,
    /// Flat-file store location, read from DB_PATH
    pub db_path: PathBuf,
    /// Buttons per menu page, read from PAGE_SIZE
    pub page_size: usize,
    /// Log file location, read from LOG_FILE_PATH
    pub log_file_path: PathBuf,
    /// Custom Bot API server, read from BOT_API_URL
    pub bot_api_url: Option<url::Url>,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the bot token is missing or a value fails to parse.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_token = get("BOT_TOKEN")
            .or_else(|| get("TELOXIDE_TOKEN"))
            .ok_or_else(|| AppError::Config("BOT_TOKEN missing".to_string()))?;

        let webhook_url = get("WEBHOOK_URL").map(|raw| parse_url("WEBHOOK_URL", &raw)).transpose()?;
        let bot_api_url = get("BOT_API_URL").map(|raw| parse_url("BOT_API_URL", &raw)).transpose()?;

        let port = parse_or("PORT", get("PORT"), server::DEFAULT_PORT)?;
        let source_channel_id = ChatId(parse_or(
            "SOURCE_CHANNEL_ID",
            get("SOURCE_CHANNEL_ID"),
            DEFAULT_SOURCE_CHANNEL_ID,
        )?);
        let page_size = parse_or("PAGE_SIZE", get("PAGE_SIZE"), menu::DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(AppError::Config("PAGE_SIZE must be at least 1".to_string()));
        }

        Ok(Self {
            bot_token: SecretString::from(bot_token),
            webhook_url,
            port,
            source_channel_id,
            db_path: get("DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()).into(),
            page_size,
            log_file_path: get("LOG_FILE_PATH")
                .unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string())
                .into(),
            bot_api_url,
        })
    }

    /// Webhook URL, required for registering the webhook.
    pub fn require_webhook_url(&self) -> AppResult<&url::Url> {
        self.webhook_url
            .as_ref()
            .ok_or_else(|| AppError::Config("WEBHOOK_URL missing".to_string()))
    }
}

/// Store path for commands that don't need the rest of the configuration.
pub fn db_path_from_env() -> PathBuf {
    env::var("DB_PATH")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
        .into()
}

fn parse_url(key: &str, raw: &str) -> AppResult<url::Url> {
    url::Url::parse(raw).map_err(|e| AppError::Config(format!("Invalid {}: {}", key, e)))
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", key, value, e))),
        None => Ok(default),
    }
}
