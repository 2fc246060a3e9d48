//! Handler types and dependencies

use std::sync::Arc;

use muqarrar_core::{Controller, SqliteRepository};

use crate::telegram::transport::TelegramTransport;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The controller as wired in production.
pub type AppController = Controller<SqliteRepository, TelegramTransport>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub controller: Arc<AppController>,
}

impl HandlerDeps {
    pub fn new(controller: Arc<AppController>) -> Self {
        Self { controller }
    }
}
