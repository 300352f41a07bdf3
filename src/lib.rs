//! channelvault - Telegram bot that indexes media posted to a storage channel
//!
//! Media posted to the source channel is recorded in a flat JSON file; users
//! who send `/start` get a paginated inline menu of those records, and pressing
//! an entry replays the stored file reference.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging, and the webhook HTTP server
//! - `storage`: Flat-file record store
//! - `telegram`: Platform client, menu builder, and update handlers
//! - `cli`: Command-line interface

pub mod cli;
pub mod core;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use core::{AppError, AppResult, Config};
pub use storage::{JsonFileStore, MediaRecord, RecordStore};
pub use telegram::{dispatch_update, HandlerDeps, Platform, TelegramPlatform};
