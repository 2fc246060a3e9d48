//! Conversation controller.
//!
//! Consumes one classified inbound event at a time, consults and updates the
//! session store, and issues repository calls and outbound sends. Two
//! parallel flows share the input channel; dispatch priority resolves the
//! overlap: an operator with an active batch session wins, then a chat with
//! a pending single-file upload, then plain viewer navigation, then the
//! fallback reply.
//!
//! Every error is caught at this boundary and converted into a user-visible
//! text reply; the chat's session entry is left exactly as it was before the
//! failed transition.

mod operator;
mod pending;
mod viewer;

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::event::{classify, Command, Event, InboundEvent, Role, RoleProvider, Transport};
use crate::repository::MaterialRepository;
use crate::session::SessionStore;
use crate::text;

pub struct Controller<R, T> {
    repo: Arc<R>,
    transport: Arc<T>,
    sessions: Arc<SessionStore>,
    roles: Arc<dyn RoleProvider>,
}

impl<R: MaterialRepository, T: Transport> Controller<R, T> {
    pub fn new(repo: Arc<R>, transport: Arc<T>, sessions: Arc<SessionStore>, roles: Arc<dyn RoleProvider>) -> Self {
        Self {
            repo,
            transport,
            sessions,
            roles,
        }
    }

    /// Handles one inbound event end to end. Never propagates an error:
    /// failures become a reply to the chat and a log line.
    pub async fn handle_event(&self, event: InboundEvent) {
        let chat_id = event.chat_id;
        let role = self.roles.role_of(&event.sender);
        let classified = classify(&event);
        log::debug!("chat {}: role {:?}, event {:?}", chat_id, role, classified);

        if let Err(err) = self.dispatch(chat_id, role, classified).await {
            self.report_error(chat_id, &err).await;
        }
    }

    async fn dispatch(&self, chat_id: i64, role: Role, event: Event) -> AppResult<()> {
        // Operator-only entry points are gated up front so the role check
        // always precedes argument validation.
        match &event {
            Event::Command(Command::UploadNew) => {
                return if role == Role::Operator {
                    self.start_upload_session(chat_id).await
                } else {
                    self.transport.send_text(chat_id, text::OPERATOR_ONLY, None).await
                };
            }
            Event::Command(Command::AddFile { args }) => {
                return if role == Role::Operator {
                    self.handle_addfile(chat_id, args).await
                } else {
                    self.transport.send_text(chat_id, text::OPERATOR_ONLY, None).await
                };
            }
            _ => {}
        }

        if role == Role::Operator && self.sessions.has_upload(chat_id) {
            return self.handle_upload_session_event(chat_id, event).await;
        }
        if self.repo.has_pending_upload(chat_id).await? {
            return self.handle_pending_event(chat_id, event).await;
        }
        if let Event::Command(Command::Register) = event {
            return self.start_registration(chat_id).await;
        }
        self.handle_viewer_event(chat_id, event).await
    }

    async fn report_error(&self, chat_id: i64, err: &AppError) {
        let reply = match err {
            AppError::StorageUnavailable(_) => text::STORAGE_UNAVAILABLE.to_string(),
            AppError::NoPendingUpload(_) => text::NO_PENDING.to_string(),
            AppError::TypeMismatch { expected, .. } => text::type_mismatch(*expected),
            AppError::IncompleteSelection(detail) => (*detail).to_string(),
            AppError::MalformedCommand { usage } => text::malformed_command(usage),
            AppError::DeliveryFailed(_) => text::DELIVERY_FAILED.to_string(),
        };
        log::error!("Event handling failed for chat {}: {}", chat_id, err);

        if let Err(send_err) = self.transport.send_text(chat_id, &reply, None).await {
            log::error!("Failed to report error to chat {}: {}", chat_id, send_err);
        }
    }
}
