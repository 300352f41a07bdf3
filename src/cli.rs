use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "channelvault")]
#[command(author, version, about = "Telegram bot serving media indexed from a storage channel", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the webhook server (default)
    Run {
        /// Don't register the webhook with Telegram on startup
        #[arg(long)]
        skip_webhook: bool,
    },

    /// Print the records currently in the store
    List {
        /// Print the raw JSON records instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Register WEBHOOK_URL with Telegram and exit
    SetWebhook,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
