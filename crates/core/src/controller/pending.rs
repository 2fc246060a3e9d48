//! Single-file registration flow (legacy path, open to any chat).
//!
//! A chat enters awaiting-file mode with /register; the next file attaches
//! to the pending upload, the next text message names the uploader, and a
//! semester/course/type selection promotes the pending upload into exactly
//! one material record.

use crate::error::{AppError, AppResult};
use crate::event::{Command, Event, MenuSelection, Transport};
use crate::keyboard::Keyboard;
use crate::repository::MaterialRepository;
use crate::taxonomy::ContentType;
use crate::text;

use super::Controller;

impl<R: MaterialRepository, T: Transport> Controller<R, T> {
    /// `/register`: puts the chat into awaiting-file mode. Idempotent — a
    /// chat that is already pending keeps its record.
    pub(super) async fn start_registration(&self, chat_id: i64) -> AppResult<()> {
        self.repo.set_pending_upload(chat_id).await?;
        self.transport
            .send_text(chat_id, text::REGISTER_STARTED, Some(Keyboard::cancel_only()))
            .await
    }

    /// Handles any event arriving while the chat has a pending upload.
    pub(super) async fn handle_pending_event(&self, chat_id: i64, event: Event) -> AppResult<()> {
        let pending = self
            .repo
            .get_pending_upload(chat_id)
            .await?
            .ok_or(AppError::NoPendingUpload(chat_id))?;

        match event {
            Event::Command(Command::Cancel) | Event::Command(Command::Home) => {
                self.repo.clear_pending_upload(chat_id).await?;
                self.sessions.clear_viewer(chat_id);
                self.transport
                    .send_text(chat_id, text::CANCELLED, Some(Keyboard::start()))
                    .await
            }
            Event::FileAttachment(attachment) => {
                // Last write wins if the chat sends a second file before
                // classification; the inferred type is a placeholder until
                // the explicit type selection at promotion.
                let inferred = ContentType::infer_from(attachment.kind);
                self.repo
                    .attach_file_to_pending(chat_id, &attachment.file_ref, inferred)
                    .await?;
                self.transport.send_text(chat_id, text::ASK_UPLOADER, None).await
            }
            Event::FreeText(name) if pending.file_ref.is_some() && pending.uploader.is_none() && !name.is_empty() => {
                self.repo.attach_uploader_to_pending(chat_id, &name).await?;
                self.transport
                    .send_text(chat_id, text::PENDING_PICK_SEMESTER, Some(Keyboard::semesters_with_cancel()))
                    .await
            }
            Event::MenuSelection(MenuSelection::Semester(semester)) if pending.file_ref.is_some() => {
                let mut state = self.sessions.viewer(chat_id);
                state.semester = Some(semester);
                state.course = None;
                self.sessions.set_viewer(chat_id, state);
                self.transport
                    .send_text(chat_id, text::CHOOSE_COURSE, Some(Keyboard::courses_with_cancel(semester)))
                    .await
            }
            Event::MenuSelection(MenuSelection::Course(course)) if pending.file_ref.is_some() => {
                let mut state = self.sessions.viewer(chat_id);
                let semester = state
                    .semester
                    .ok_or(AppError::IncompleteSelection(text::PICK_SEMESTER_FIRST))?;
                if !semester.has_course(course) {
                    return self
                        .transport
                        .send_text(chat_id, text::NOT_UNDERSTOOD, Some(Keyboard::courses_with_cancel(semester)))
                        .await;
                }
                state.course = Some(course.to_string());
                self.sessions.set_viewer(chat_id, state);
                self.transport
                    .send_text(chat_id, &text::choose_type(course), Some(Keyboard::content_types_with_cancel()))
                    .await
            }
            Event::MenuSelection(MenuSelection::ContentType(content_type)) if pending.file_ref.is_some() => {
                let state = self.sessions.viewer(chat_id);
                let semester = state
                    .semester
                    .ok_or(AppError::IncompleteSelection(text::PICK_SEMESTER_FIRST))?;
                let course = state
                    .course
                    .ok_or(AppError::IncompleteSelection(text::PICK_COURSE_FIRST))?;
                let file_ref = pending
                    .file_ref
                    .as_deref()
                    .ok_or(AppError::NoPendingUpload(chat_id))?;

                // The explicitly selected type wins over the kind inferred
                // when the file arrived.
                self.repo
                    .add_material(semester, &course, content_type, file_ref, pending.uploader.as_deref())
                    .await?;
                self.repo.clear_pending_upload(chat_id).await?;
                self.sessions.clear_viewer(chat_id);
                self.transport
                    .send_text(chat_id, &text::pending_saved(&course, content_type), Some(Keyboard::start()))
                    .await
            }
            _ => {
                // Re-prompt for whatever step is still missing.
                let prompt = if pending.file_ref.is_none() {
                    text::PENDING_SEND_FILE_FIRST
                } else if pending.uploader.is_none() {
                    text::ASK_UPLOADER
                } else {
                    text::PENDING_PICK_SEMESTER
                };
                self.transport.send_text(chat_id, prompt, None).await
            }
        }
    }
}
