//! Indexing of media posted to the source channel

use teloxide::types::Message;

use super::types::HandlerDeps;
use crate::storage::MediaKind;

/// Media attached to a channel post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMedia {
    pub kind: MediaKind,
    pub file_ref: String,
}

/// Picks the media to index from a message.
///
/// Documents win over videos, videos over photos. Animations arrive with a
/// mirrored document and are stored as documents. For photos only the
/// largest variant is kept.
pub fn extract_media(msg: &Message) -> Option<PostedMedia> {
    if let Some(doc) = msg.document() {
        return Some(PostedMedia {
            kind: MediaKind::Document,
            file_ref: doc.file.id.0.clone(),
        });
    }
    if let Some(animation) = msg.animation() {
        return Some(PostedMedia {
            kind: MediaKind::Document,
            file_ref: animation.file.id.0.clone(),
        });
    }
    if let Some(video) = msg.video() {
        return Some(PostedMedia {
            kind: MediaKind::Video,
            file_ref: video.file.id.0.clone(),
        });
    }
    msg.photo()
        .and_then(|photos| {
            photos
                .iter()
                .max_by_key(|p| u64::from(p.width) * u64::from(p.height))
        })
        .map(|photo| PostedMedia {
            kind: MediaKind::Photo,
            file_ref: photo.file.id.0.clone(),
        })
}

/// Caption of the post, or a placeholder naming the media kind and message id.
pub fn derive_title(msg: &Message, kind: MediaKind) -> String {
    msg.caption()
        .map(str::trim)
        .filter(|caption| !caption.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| kind.default_title(msg.id.0))
}

/// Upserts a record for a post in the source channel.
///
/// Posts from other chats and posts without recognised media leave the store untouched.
pub(super) fn handle_channel_post(deps: &HandlerDeps, msg: &Message) {
    if msg.chat.id != deps.source_channel_id {
        log::debug!("Ignoring post from chat {} (not the source channel)", msg.chat.id);
        return;
    }

    let Some(media) = extract_media(msg) else {
        log::info!("Ignored channel post: {}", msg.id.0);
        return;
    };

    let title = derive_title(msg, media.kind);
    let outcome = deps.store.upsert(&title, &media.file_ref, msg.id.0, media.kind);
    log::info!("Saved {} {}: {} ({:?})", media.kind, msg.id.0, title, outcome);
}
