//! Muqarrar core — course-material registry and conversation state machine.
//!
//! This library holds everything that does not touch Telegram directly:
//!
//! - `taxonomy`: the fixed semester/course/content-type catalogue
//! - `storage`: SQLite pool, migrations and row-level CRUD
//! - `repository`: the [`MaterialRepository`] contract and its SQLite impl
//! - `session`: per-chat in-memory navigation and batch-upload state
//! - `event`: inbound event classification, transport contract, roles
//! - `controller`: the menu-driven conversation state machine
//!
//! The `muqarrar` binary crate plugs a teloxide transport into these seams.

pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod keyboard;
pub mod logging;
pub mod repository;
pub mod session;
pub mod storage;
pub mod taxonomy;
pub mod text;

// Re-export commonly used types for convenience
pub use controller::Controller;
pub use error::{AppError, AppResult};
pub use event::{InboundEvent, RoleProvider, StaticOperator, Transport};
pub use repository::{MaterialRepository, SqliteRepository};
pub use session::SessionStore;
pub use storage::{create_pool, get_connection, DbConnection, DbPool};
