//! Dispatcher wiring: dependencies and the handler tree

mod schema;
mod types;

pub use schema::schema;
pub use types::{AppController, HandlerDeps, HandlerError};
