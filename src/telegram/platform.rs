//! Outbound Bot API calls
//!
//! The dispatcher talks to Telegram only through the [`Platform`] trait so
//! handlers can be exercised without a network. [`TelegramPlatform`] is the
//! production implementation backed by a teloxide [`Bot`].

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, FileId, InlineKeyboardMarkup, InputFile, MessageId};

use crate::core::error::AppResult;

/// Messaging platform operations used by the bot
#[async_trait]
pub trait Platform: Send + Sync {
    /// Sends a text message, optionally with an inline keyboard.
    async fn send_message(&self, chat_id: ChatId, text: &str, keyboard: Option<InlineKeyboardMarkup>)
        -> AppResult<()>;

    /// Re-sends previously uploaded media as a document by its file reference.
    async fn send_document(&self, chat_id: ChatId, file_ref: &str, caption: &str) -> AppResult<()>;

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> AppResult<()>;

    /// Stops the client-side loading indicator on a pressed button.
    async fn answer_callback_query(&self, query_id: &CallbackQueryId) -> AppResult<()>;

    async fn set_webhook(&self, url: &url::Url) -> AppResult<()>;
}

/// [`Platform`] backed by the Telegram Bot API
#[derive(Clone)]
pub struct TelegramPlatform {
    bot: Bot,
}

impl TelegramPlatform {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

#[async_trait]
impl Platform for TelegramPlatform {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> AppResult<()> {
        let mut request = self.bot.send_message(chat_id, text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }
        request.await?;
        Ok(())
    }

    async fn send_document(&self, chat_id: ChatId, file_ref: &str, caption: &str) -> AppResult<()> {
        self.bot
            .send_document(chat_id, InputFile::file_id(FileId(file_ref.to_string())))
            .caption(caption)
            .await?;
        Ok(())
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> AppResult<()> {
        self.bot.delete_message(chat_id, message_id).await?;
        Ok(())
    }

    async fn answer_callback_query(&self, query_id: &CallbackQueryId) -> AppResult<()> {
        self.bot.answer_callback_query(query_id.clone()).await?;
        Ok(())
    }

    async fn set_webhook(&self, url: &url::Url) -> AppResult<()> {
        self.bot.set_webhook(url.clone()).await?;
        Ok(())
    }
}
