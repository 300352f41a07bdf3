//! Command handler implementations (/start)

use teloxide::types::Message;

use super::types::{HandlerDeps, EMPTY_STORE_GREETING};
use crate::core::error::AppResult;
use crate::telegram::bot::{parse_command, Command};
use crate::telegram::menu::send_menu_page;

/// Routes a private or group message carrying a bot command.
///
/// Messages that are not a known command are ignored.
pub(super) async fn handle_message(deps: &HandlerDeps, msg: &Message) -> AppResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(cmd) = parse_command(text, deps.bot_username.as_deref()) else {
        log::debug!("Ignoring non-command message in chat {}", msg.chat.id);
        return Ok(());
    };

    log::info!("🎯 Received command: {:?} from chat {}", cmd, msg.chat.id);
    match cmd {
        Command::Start => handle_start_command(deps, msg).await,
    }
}

/// Handle /start command
async fn handle_start_command(deps: &HandlerDeps, msg: &Message) -> AppResult<()> {
    if deps.store.is_empty() {
        deps.platform
            .send_message(msg.chat.id, EMPTY_STORE_GREETING, None)
            .await?;
        return Ok(());
    }

    send_menu_page(deps.store.as_ref(), deps.platform.as_ref(), msg.chat.id, 0, deps.page_size).await
}
