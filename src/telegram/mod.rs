//! Telegram bot integration and handlers

pub mod bot;
pub mod handlers;
pub mod menu;
pub mod platform;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{dispatch_update, HandlerDeps};
pub use menu::{build_page, send_menu_page, CallbackAction};
pub use platform::{Platform, TelegramPlatform};
