//! Paginated media menu
//!
//! Builds the inline keyboard listing stored media and parses the callback
//! payloads its buttons carry. Only [`send_menu_page`] has side effects.

use std::fmt;
use std::ops::Range;

use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup};

use crate::core::error::AppResult;
use crate::storage::{MediaRecord, RecordStore};
use crate::telegram::platform::Platform;

/// Text sent above the menu keyboard
pub const MENU_CAPTION: &str = "Select a video:";

/// Reply when a menu page is requested while nothing has been indexed
pub const NO_MEDIA_TEXT: &str = "No videos available yet.";

/// Action encoded in a menu button's callback data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// Page indicator; nothing to do
    Noop,
    /// Re-render the first page from a fresh store read
    Refresh,
    /// Render the given zero-based page
    Page(usize),
    /// Send the media with the given record id
    Play(String),
}

impl CallbackAction {
    /// Parses callback data.
    ///
    /// A `page:` payload with an unreadable number falls back to the first page.
    /// Returns `None` for empty or unknown payloads.
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "" => None,
            "noop" => Some(Self::Noop),
            "refresh_db" => Some(Self::Refresh),
            _ => {
                if let Some(page) = data.strip_prefix("page:") {
                    Some(Self::Page(page.trim().parse().unwrap_or(0)))
                } else {
                    data.strip_prefix("play:").map(|id| Self::Play(id.to_string()))
                }
            }
        }
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Noop => write!(f, "noop"),
            Self::Refresh => write!(f, "refresh_db"),
            Self::Page(page) => write!(f, "page:{}", page),
            Self::Play(id) => write!(f, "play:{}", id),
        }
    }
}

/// Number of pages needed for `total` records
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Index range of the records shown on `page`.
///
/// Pages past the end are clamped to the last page.
pub fn page_bounds(total: usize, page: usize, page_size: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let current = page.min(page_count(total, page_size).saturating_sub(1));
    let start = current * page_size;
    start..(start + page_size).min(total)
}

/// Builds the keyboard for one menu page.
///
/// Layout: one row per record, a navigation row (prev / page indicator / next),
/// then a refresh row. Prev is omitted on the first page and next on the last.
pub fn build_page(records: &[MediaRecord], page: usize, page_size: usize) -> InlineKeyboardMarkup {
    let total = records.len();
    let total_pages = page_count(total, page_size).max(1);
    let bounds = page_bounds(total, page, page_size);
    let current = page.min(total_pages - 1);

    let mut keyboard_rows: Vec<Vec<InlineKeyboardButton>> = records[bounds.clone()]
        .iter()
        .map(|record| {
            vec![InlineKeyboardButton::callback(
                record.title.clone(),
                CallbackAction::Play(record.id.clone()).to_string(),
            )]
        })
        .collect();

    let mut nav_buttons = Vec::new();
    if current > 0 {
        nav_buttons.push(InlineKeyboardButton::callback(
            "⬅ Prev",
            CallbackAction::Page(current - 1).to_string(),
        ));
    }
    nav_buttons.push(InlineKeyboardButton::callback(
        format!("Page {}/{}", current + 1, total_pages),
        CallbackAction::Noop.to_string(),
    ));
    if bounds.end < total {
        nav_buttons.push(InlineKeyboardButton::callback(
            "Next ➡",
            CallbackAction::Page(current + 1).to_string(),
        ));
    }
    keyboard_rows.push(nav_buttons);

    keyboard_rows.push(vec![InlineKeyboardButton::callback(
        "🔄 Refresh",
        CallbackAction::Refresh.to_string(),
    )]);

    InlineKeyboardMarkup::new(keyboard_rows)
}

/// Sends one menu page to `chat_id`, reading the records fresh from the store.
pub async fn send_menu_page(
    store: &dyn RecordStore,
    platform: &dyn Platform,
    chat_id: ChatId,
    page: usize,
    page_size: usize,
) -> AppResult<()> {
    let records = store.load();
    if records.is_empty() {
        platform.send_message(chat_id, NO_MEDIA_TEXT, None).await?;
        return Ok(());
    }

    log::debug!("Sending menu page {} of {} records to chat {}", page, records.len(), chat_id);
    let keyboard = build_page(&records, page, page_size);
    platform.send_message(chat_id, MENU_CAPTION, Some(keyboard)).await
}
