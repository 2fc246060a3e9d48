//! Telegram integration: bot setup, update conversion, transport, dispatch

pub mod bot;
pub mod event;
pub mod handlers;
pub mod transport;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{schema, HandlerDeps};
pub use transport::TelegramTransport;
