//! Update routing
//!
//! Webhook deliveries arrive one `Update` at a time; each is routed by kind to
//! the command, callback or channel-post handler. Handler failures are logged
//! here and never reach the HTTP layer.

use teloxide::types::{Update, UpdateKind};

use super::callbacks::handle_callback_query;
use super::channel_posts::handle_channel_post;
use super::commands::handle_message;
use super::types::HandlerDeps;

/// Routes a single update to its handler.
///
/// Edited channel posts are indexed like new ones so a corrected caption or
/// replaced file updates the existing record. Other update kinds are ignored.
pub async fn dispatch_update(deps: &HandlerDeps, update: &Update) {
    let result = match &update.kind {
        UpdateKind::Message(msg) => handle_message(deps, msg).await,
        UpdateKind::CallbackQuery(query) => handle_callback_query(deps, query).await,
        UpdateKind::ChannelPost(msg) | UpdateKind::EditedChannelPost(msg) => {
            handle_channel_post(deps, msg);
            Ok(())
        }
        _ => {
            log::debug!("Ignoring update {:?}: unsupported kind", update.id);
            Ok(())
        }
    };

    if let Err(e) = result {
        log::error!("Error handling update {:?}: {}", update.id, e);
    }
}
