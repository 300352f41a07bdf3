//! Callback query handler (inline keyboard buttons)

use teloxide::types::{CallbackQuery, ChatId, MessageId};

use super::types::{HandlerDeps, DELIVERY_FAILED_TEXT, NOT_FOUND_TEXT};
use crate::core::error::AppResult;
use crate::telegram::menu::{send_menu_page, CallbackAction};

pub(super) async fn handle_callback_query(deps: &HandlerDeps, query: &CallbackQuery) -> AppResult<()> {
    if let Err(e) = deps.platform.answer_callback_query(&query.id).await {
        log::warn!("Failed to answer callback query {:?}: {}", query.id, e);
    }

    // Buttons on inline-mode messages carry no chat to reply into
    let Some(message) = query.message.as_ref() else {
        log::debug!("Callback query {:?} has no message attached, ignoring", query.id);
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = message.id();

    let Some(action) = query.data.as_deref().and_then(CallbackAction::parse) else {
        log::debug!("Ignoring callback data {:?} in chat {}", query.data, chat_id);
        return Ok(());
    };

    log::info!("Callback {} from chat {}", action, chat_id);
    match action {
        CallbackAction::Noop => Ok(()),
        CallbackAction::Refresh => replace_menu(deps, chat_id, message_id, 0).await,
        CallbackAction::Page(page) => replace_menu(deps, chat_id, message_id, page).await,
        CallbackAction::Play(id) => play(deps, chat_id, &id).await,
    }
}

/// Removes the pressed menu and sends the requested page in its place.
async fn replace_menu(deps: &HandlerDeps, chat_id: ChatId, message_id: MessageId, page: usize) -> AppResult<()> {
    if let Err(e) = deps.platform.delete_message(chat_id, message_id).await {
        log::warn!("Failed to delete menu message {} in chat {}: {}", message_id.0, chat_id, e);
    }
    send_menu_page(deps.store.as_ref(), deps.platform.as_ref(), chat_id, page, deps.page_size).await
}

async fn play(deps: &HandlerDeps, chat_id: ChatId, id: &str) -> AppResult<()> {
    let Some(record) = deps.store.find(id) else {
        log::info!("Record {} not found for chat {}", id, chat_id);
        deps.platform.send_message(chat_id, NOT_FOUND_TEXT, None).await?;
        return Ok(());
    };

    if let Err(e) = deps
        .platform
        .send_document(chat_id, &record.file_ref, &record.title)
        .await
    {
        log::error!("Failed to send document {} to chat {}: {}", record.id, chat_id, e);
        deps.platform.send_message(chat_id, DELIVERY_FAILED_TEXT, None).await?;
    }
    Ok(())
}
