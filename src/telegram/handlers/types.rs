//! Handler dependencies and user-facing reply texts

use std::sync::Arc;

use teloxide::types::ChatId;

use crate::core::config::Config;
use crate::storage::RecordStore;
use crate::telegram::platform::Platform;

/// Reply to /start while nothing has been indexed yet
pub const EMPTY_STORE_GREETING: &str =
    "Hello! No videos yet in the channel.\nForward/upload videos to your storage channel.";

/// Reply when a `play:` button refers to a record that no longer exists
pub const NOT_FOUND_TEXT: &str = "Video not found. Try Refresh.";

/// Reply when Telegram refuses to resend a stored file
pub const DELIVERY_FAILED_TEXT: &str =
    "Failed to send video. It might be protected or file_id expired. Re-upload to channel if needed.";

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub store: Arc<dyn RecordStore>,
    pub platform: Arc<dyn Platform>,
    /// Only channel posts from this chat are indexed
    pub source_channel_id: ChatId,
    pub page_size: usize,
    /// Used to accept `/start@<bot>` addressed to this bot only
    pub bot_username: Option<String>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(
        store: Arc<dyn RecordStore>,
        platform: Arc<dyn Platform>,
        source_channel_id: ChatId,
        page_size: usize,
    ) -> Self {
        Self {
            store,
            platform,
            source_channel_id,
            page_size,
            bot_username: None,
        }
    }

    /// Dependencies wired from the runtime configuration
    pub fn from_config(config: &Config, store: Arc<dyn RecordStore>, platform: Arc<dyn Platform>) -> Self {
        Self::new(store, platform, config.source_channel_id, config.page_size)
    }

    pub fn with_bot_username(mut self, username: Option<String>) -> Self {
        self.bot_username = username;
        self
    }
}
