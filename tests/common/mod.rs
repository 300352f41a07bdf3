//! Common test utilities
//!
//! This module is shared across all integration tests

pub mod fixtures;
pub mod recorder;

#[allow(unused_imports)]
pub use fixtures::{
    callback_update, channel_post_json, channel_post_update, command_update, edited_channel_post_update,
    edited_message_update, seeded_store, PostMedia, TestEnvironment, MENU_MESSAGE_ID, SOURCE_CHANNEL_ID,
    USER_CHAT_ID,
};
#[allow(unused_imports)]
pub use recorder::{PlatformCall, RecordingPlatform};
