//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{HandlerDeps, HandlerError};
use crate::telegram::event::{has_dispatchable_content, inbound_event};

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The returned handler tree is used with teloxide's Dispatcher in
/// production; the same conversation logic is exercised directly against the
/// controller in the core crate's tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry().branch(message_handler(deps))
}

/// Handler for messages carrying text, a button label, or an attachment.
/// Everything else (service messages, stickers, ...) is left unanswered.
fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| has_dispatchable_content(&msg))
        .endpoint(move |msg: Message| {
            let deps = deps.clone();
            async move {
                let event = inbound_event(&msg);
                deps.controller.handle_event(event).await;
                Ok(())
            }
        })
}
