use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;

use channelvault::cli::{Cli, Commands};
use channelvault::core::config::{self, Config};
use channelvault::core::web_server::{create_router, start_web_server};
use channelvault::core::{init_logger, install_panic_hook};
use channelvault::storage::{JsonFileStore, RecordStore};
use channelvault::telegram::{create_bot, setup_bot_commands, HandlerDeps, Platform, TelegramPlatform};
use teloxide::prelude::*;

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if required configuration is missing or startup fails.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    install_panic_hook();

    match cli.command {
        Some(Commands::Run { skip_webhook }) => run_bot(skip_webhook).await,
        Some(Commands::List { json }) => run_list(json),
        Some(Commands::SetWebhook) => run_set_webhook().await,
        None => run_bot(false).await,
    }
}

/// Loads configuration and starts logging; shared by the bot-facing commands.
fn init_runtime() -> Result<Config> {
    let config = Config::from_env()?;
    init_logger(&config.log_file_path)?;
    Ok(config)
}

/// Run the webhook server until Ctrl-C
async fn run_bot(skip_webhook: bool) -> Result<()> {
    let config = init_runtime()?;
    let webhook_url = config.require_webhook_url()?.clone();
    log::info!("Starting bot...");

    let bot = create_bot(&config)?;
    let platform = Arc::new(TelegramPlatform::new(bot.clone()));

    let bot_username = match bot.get_me().await {
        Ok(me) => me.user.username.clone(),
        Err(e) => {
            log::warn!("Failed to fetch bot info: {}. /start@<bot> will not be matched.", e);
            None
        }
    };

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    if skip_webhook {
        log::info!("Skipping webhook registration");
    } else {
        platform.set_webhook(&webhook_url).await?;
        log::info!("Webhook set successfully");
    }

    let store = Arc::new(JsonFileStore::new(config.db_path.clone()));
    log::info!(
        "Indexing channel {} into {} ({} records)",
        config.source_channel_id,
        store.path().display(),
        store.load().len()
    );

    let deps = HandlerDeps::from_config(&config, store, platform).with_bot_username(bot_username);
    let router = create_router(deps, config.bot_token);

    start_web_server(config.port, router, shutdown_signal()).await?;
    log::info!("Web server stopped");
    Ok(())
}

/// Register the webhook and exit
async fn run_set_webhook() -> Result<()> {
    let config = init_runtime()?;
    let webhook_url = config.require_webhook_url()?;

    let platform = TelegramPlatform::new(create_bot(&config)?);
    platform.set_webhook(webhook_url).await?;
    log::info!("Webhook set to {}", webhook_url);
    Ok(())
}

/// Print stored records
fn run_list(json: bool) -> Result<()> {
    let store = JsonFileStore::new(config::db_path_from_env());
    let records = store.try_load()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No records in {}", store.path().display());
        return Ok(());
    }

    println!("{:<10} {:<10} TITLE", "ID", "KIND");
    for record in &records {
        let kind = record.kind.map(|k| k.to_string()).unwrap_or_else(|| "-".to_string());
        println!("{:<10} {:<10} {}", record.id, kind, record.title);
    }
    println!("\n{} record(s) in {}", records.len(), store.path().display());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        // Keep serving; the process can still be stopped externally
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down gracefully...");
}
