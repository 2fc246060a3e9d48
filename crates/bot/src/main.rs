use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use url::Url;

mod cli;
mod telegram;

use cli::{Cli, Commands};
use muqarrar_core::config;
use muqarrar_core::event::StaticOperator;
use muqarrar_core::logging::init_logger;
use muqarrar_core::{Controller, SessionStore, SqliteRepository};
use telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, TelegramTransport};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, database, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Catch panics from the dispatcher so they end up in the log instead of
    // tearing the process down silently.
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    init_logger(&config::LOG_FILE_PATH)?;

    // Load environment variables from .env if present
    let _ = dotenv();

    match cli.command {
        Some(Commands::Run { webhook }) => {
            log::info!("Running bot in normal mode (webhook: {})", webhook);
            run_bot(webhook).await
        }
        Some(Commands::Migrate) => {
            muqarrar_core::create_pool(&config::DATABASE_PATH)
                .map_err(|e| anyhow::anyhow!("Failed to migrate database: {}", e))?;
            log::info!("Database migrated: {}", *config::DATABASE_PATH);
            Ok(())
        }
        None => {
            log::info!("No command specified, running bot in default mode");
            run_bot(false).await
        }
    }
}

async fn run_bot(webhook: bool) -> Result<()> {
    let repo = Arc::new(
        SqliteRepository::open(&config::DATABASE_PATH)
            .map_err(|e| anyhow::anyhow!("Failed to open material repository: {}", e))?,
    );
    let sessions = Arc::new(SessionStore::new());
    let roles = Arc::new(StaticOperator::from_env());

    if config::operator::OPERATOR_HANDLE.is_empty() {
        log::warn!("OPERATOR_HANDLE not set - nobody can register new materials");
    }

    let bot = create_bot()?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let transport = Arc::new(TelegramTransport::new(bot.clone()));
    let controller = Arc::new(Controller::new(repo, transport, sessions, roles));
    let deps = HandlerDeps::new(controller);

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema(deps))
        .enable_ctrlc_handler()
        .build();

    match webhook_url(webhook) {
        Some(url) => {
            let addr = ([0, 0, 0, 0], *config::network::WEBHOOK_PORT).into();
            log::info!("Starting webhook listener on port {} for {}", *config::network::WEBHOOK_PORT, url);
            let mut options = webhooks::Options::new(addr, url);
            if let Some(secret) = config::WEBHOOK_SECRET_TOKEN.as_deref() {
                options = options.secret_token(secret.to_string());
            }
            let listener = webhooks::axum(bot, options)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to set up webhook: {}", e))?;
            dispatcher
                .dispatch_with_listener(listener, LoggingErrorHandler::with_custom_text("Webhook listener error"))
                .await;
        }
        None => {
            log::info!("Starting long polling");
            dispatcher.dispatch().await;
        }
    }

    Ok(())
}

/// The webhook URL to register, when webhook mode is requested and usable.
fn webhook_url(webhook: bool) -> Option<Url> {
    if !webhook {
        return None;
    }
    let raw = match config::WEBHOOK_URL.as_deref() {
        Some(raw) => raw,
        None => {
            log::warn!("Webhook mode requested but WEBHOOK_URL is not set; falling back to polling");
            return None;
        }
    };
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(e) => {
            log::warn!("Invalid WEBHOOK_URL '{}': {}; falling back to polling", raw, e);
            None
        }
    }
}
