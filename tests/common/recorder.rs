//! Platform double that records outbound Bot API calls
//!
//! Handlers under test talk to this instead of Telegram, so assertions can be
//! made on exactly which replies were sent.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use channelvault::core::error::{AppError, AppResult};
use channelvault::telegram::Platform;
use teloxide::types::{CallbackQueryId, ChatId, InlineKeyboardButtonKind, InlineKeyboardMarkup, MessageId};

/// One recorded outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    SendMessage {
        chat_id: i64,
        text: String,
        /// Callback data of every button, row by row
        keyboard: Option<Vec<Vec<String>>>,
    },
    SendDocument {
        chat_id: i64,
        file_ref: String,
        caption: String,
    },
    DeleteMessage {
        chat_id: i64,
        message_id: i32,
    },
    AnswerCallback,
    SetWebhook {
        url: String,
    },
}

/// Recording [`Platform`] implementation
#[derive(Default)]
pub struct RecordingPlatform {
    calls: Mutex<Vec<PlatformCall>>,
    fail_documents: AtomicBool,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `send_document` fail, as Telegram does for an expired file_id
    pub fn fail_documents(&self) {
        self.fail_documents.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Only the `SendMessage` calls, in order
    pub fn sent_messages(&self) -> Vec<PlatformCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, PlatformCall::SendMessage { .. }))
            .collect()
    }

    fn record(&self, call: PlatformCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn keyboard_data(markup: &InlineKeyboardMarkup) -> Vec<Vec<String>> {
    markup
        .inline_keyboard
        .iter()
        .map(|row| {
            row.iter()
                .map(|button| match &button.kind {
                    InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
                    _ => String::new(),
                })
                .collect()
        })
        .collect()
}

#[async_trait]
impl Platform for RecordingPlatform {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> AppResult<()> {
        self.record(PlatformCall::SendMessage {
            chat_id: chat_id.0,
            text: text.to_string(),
            keyboard: keyboard.as_ref().map(keyboard_data),
        });
        Ok(())
    }

    async fn send_document(&self, chat_id: ChatId, file_ref: &str, caption: &str) -> AppResult<()> {
        self.record(PlatformCall::SendDocument {
            chat_id: chat_id.0,
            file_ref: file_ref.to_string(),
            caption: caption.to_string(),
        });
        if self.fail_documents.load(Ordering::SeqCst) {
            return Err(AppError::Io(std::io::Error::other(
                "Bad Request: wrong file identifier/HTTP URL specified",
            )));
        }
        Ok(())
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> AppResult<()> {
        self.record(PlatformCall::DeleteMessage {
            chat_id: chat_id.0,
            message_id: message_id.0,
        });
        Ok(())
    }

    async fn answer_callback_query(&self, _query_id: &CallbackQueryId) -> AppResult<()> {
        self.record(PlatformCall::AnswerCallback);
        Ok(())
    }

    async fn set_webhook(&self, url: &url::Url) -> AppResult<()> {
        self.record(PlatformCall::SetWebhook { url: url.to_string() });
        Ok(())
    }
}
