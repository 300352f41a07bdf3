//! Test fixtures for dispatcher and webhook tests
//!
//! Provides TestEnvironment with everything a handler needs:
//! - JSON store in a temporary directory
//! - Recording platform double
//! - Update builders shaped like real Bot API payloads

#![allow(dead_code)]

use std::sync::Arc;

use channelvault::storage::{JsonFileStore, MediaKind, RecordStore};
use channelvault::telegram::HandlerDeps;
use serde_json::{json, Value};
use teloxide::types::{ChatId, Update};
use tempfile::TempDir;

use super::RecordingPlatform;

/// Chat id of the storage channel in every test
pub const SOURCE_CHANNEL_ID: i64 = -1003370713141;

/// Private chat the test user talks to the bot from
pub const USER_CHAT_ID: i64 = 123456789;

/// Message id of the menu message the callback buttons belong to
pub const MENU_MESSAGE_ID: i32 = 500;

const DATE: i64 = 1_700_000_000;

/// Complete test environment
///
/// # Example
/// ```ignore
/// let env = TestEnvironment::new();
/// dispatch_update(&env.deps, &command_update("/start")).await;
/// assert_eq!(env.platform.sent_messages().len(), 1);
/// ```
pub struct TestEnvironment {
    pub store: Arc<JsonFileStore>,
    pub platform: Arc<RecordingPlatform>,
    pub deps: HandlerDeps,
    pub chat_id: ChatId,
    // Keeps the store directory alive for the duration of the test
    _dir: TempDir,
}

impl TestEnvironment {
    /// Empty store, page size 6
    pub fn new() -> Self {
        Self::with_page_size(6)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let store = Arc::new(JsonFileStore::new(dir.path().join("video_db.json")));
        let platform = Arc::new(RecordingPlatform::new());
        let deps = HandlerDeps::new(store.clone(), platform.clone(), ChatId(SOURCE_CHANNEL_ID), page_size);

        Self {
            store,
            platform,
            deps,
            chat_id: ChatId(USER_CHAT_ID),
            _dir: dir,
        }
    }

    /// Environment whose store already holds `count` video records with ids 1..=count
    pub fn seeded(count: i32) -> Self {
        let env = Self::new();
        seeded_store(env.store.as_ref(), count);
        env
    }
}

/// Inserts `count` video records titled "Clip N" with message ids 1..=count
pub fn seeded_store(store: &dyn RecordStore, count: i32) {
    for id in 1..=count {
        store.upsert(&format!("Clip {}", id), &format!("file-{}", id), id, MediaKind::Video);
    }
}

fn private_chat() -> Value {
    json!({
        "id": USER_CHAT_ID,
        "type": "private",
        "first_name": "Test",
        "username": "test_user"
    })
}

fn user() -> Value {
    json!({
        "id": USER_CHAT_ID,
        "is_bot": false,
        "first_name": "Test",
        "username": "test_user"
    })
}

fn channel(chat_id: i64) -> Value {
    json!({
        "id": chat_id,
        "type": "channel",
        "title": "Storage"
    })
}

fn file(file_id: &str) -> Value {
    json!({
        "file_id": file_id,
        "file_unique_id": format!("unique-{}", file_id),
        "file_size": 1024
    })
}

/// Decodes from text, as the webhook endpoint does. teloxide's `Update`
/// deserializer does not accept a `serde_json::Value` directly.
fn parse_update(value: Value) -> Update {
    serde_json::from_str(&value.to_string()).expect("fixture must deserialize as Update")
}

/// Media attached to a fixture channel post
#[derive(Debug, Clone)]
pub enum PostMedia {
    None,
    Document(&'static str),
    Video(&'static str),
    Animation(&'static str),
    /// Photo variants as (file_id, width, height)
    Photo(Vec<(&'static str, u32, u32)>),
}

/// Text message from the test user in a private chat
pub fn command_update(text: &str) -> Update {
    let mut message = json!({
        "message_id": 10,
        "date": DATE,
        "chat": private_chat(),
        "from": user(),
        "text": text
    });
    if text.starts_with('/') {
        let command_len = text.split_whitespace().next().map_or(0, |c| c.encode_utf16().count());
        message["entities"] = json!([{ "type": "bot_command", "offset": 0, "length": command_len }]);
    }
    parse_update(json!({ "update_id": 1, "message": message }))
}

/// Channel post JSON without the update envelope
pub fn channel_post_json(chat_id: i64, message_id: i32, media: PostMedia, caption: Option<&str>) -> Value {
    let mut message = json!({
        "message_id": message_id,
        "date": DATE,
        "chat": channel(chat_id),
        "sender_chat": channel(chat_id)
    });

    match media {
        PostMedia::None => message["text"] = json!("just text"),
        PostMedia::Document(id) => {
            let mut doc = file(id);
            doc["file_name"] = json!("clip.mp4");
            doc["mime_type"] = json!("video/mp4");
            message["document"] = doc;
        }
        PostMedia::Video(id) => {
            let mut video = file(id);
            video["width"] = json!(1280);
            video["height"] = json!(720);
            video["duration"] = json!(42);
            video["mime_type"] = json!("video/mp4");
            message["video"] = video;
        }
        PostMedia::Animation(id) => {
            // Telegram sends GIFs with both `animation` and a mirrored `document`
            let mut animation = file(id);
            animation["width"] = json!(480);
            animation["height"] = json!(270);
            animation["duration"] = json!(3);
            animation["file_name"] = json!("loop.mp4");
            animation["mime_type"] = json!("video/mp4");
            let mut doc = file(id);
            doc["file_name"] = json!("loop.mp4");
            doc["mime_type"] = json!("video/mp4");
            message["animation"] = animation;
            message["document"] = doc;
        }
        PostMedia::Photo(variants) => {
            let sizes: Vec<Value> = variants
                .into_iter()
                .map(|(id, width, height)| {
                    let mut size = file(id);
                    size["width"] = json!(width);
                    size["height"] = json!(height);
                    size
                })
                .collect();
            message["photo"] = json!(sizes);
        }
    }

    if let Some(caption) = caption {
        message["caption"] = json!(caption);
    }
    message
}

/// `channel_post` update
pub fn channel_post_update(chat_id: i64, message_id: i32, media: PostMedia, caption: Option<&str>) -> Update {
    parse_update(json!({
        "update_id": 2,
        "channel_post": channel_post_json(chat_id, message_id, media, caption)
    }))
}

/// `edited_channel_post` update
pub fn edited_channel_post_update(chat_id: i64, message_id: i32, media: PostMedia, caption: Option<&str>) -> Update {
    let mut message = channel_post_json(chat_id, message_id, media, caption);
    message["edit_date"] = json!(DATE + 60);
    parse_update(json!({ "update_id": 3, "edited_channel_post": message }))
}

/// Callback query pressed on the menu message
pub fn callback_update(data: &str) -> Update {
    parse_update(json!({
        "update_id": 4,
        "callback_query": {
            "id": "cbq-1",
            "from": user(),
            "chat_instance": "instance-1",
            "data": data,
            "message": {
                "message_id": MENU_MESSAGE_ID,
                "date": DATE,
                "chat": private_chat(),
                "from": {
                    "id": 42,
                    "is_bot": true,
                    "first_name": "Vault",
                    "username": "vault_bot"
                },
                "text": "Select a video:"
            }
        }
    }))
}

/// Update kind the dispatcher does not handle
pub fn edited_message_update() -> Update {
    parse_update(json!({
        "update_id": 5,
        "edited_message": {
            "message_id": 11,
            "date": DATE,
            "edit_date": DATE + 5,
            "chat": private_chat(),
            "from": user(),
            "text": "/start"
        }
    }))
}
