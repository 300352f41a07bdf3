//! Webhook update handlers
//!
//! Handlers receive their store and platform client through [`HandlerDeps`],
//! so integration tests drive the same routing as production.

mod callbacks;
mod channel_posts;
mod commands;
mod schema;
mod types;

pub use channel_posts::{derive_title, extract_media, PostedMedia};
pub use schema::dispatch_update;
pub use types::{HandlerDeps, DELIVERY_FAILED_TEXT, EMPTY_STORE_GREETING, NOT_FOUND_TEXT};
