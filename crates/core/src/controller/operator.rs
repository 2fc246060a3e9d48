//! Operator batch-upload flow and the /addfile direct insert.

use crate::error::{AppError, AppResult};
use crate::event::{Command, Event, MenuSelection, Transport};
use crate::keyboard::Keyboard;
use crate::repository::MaterialRepository;
use crate::session::UploadSession;
use crate::taxonomy::{ContentType, Semester};
use crate::text;

use super::Controller;

impl<R: MaterialRepository, T: Transport> Controller<R, T> {
    /// `/upload`: opens a fresh, empty batch session. An existing session
    /// for the chat is replaced, not resumed.
    pub(super) async fn start_upload_session(&self, chat_id: i64) -> AppResult<()> {
        self.sessions.set_upload(chat_id, UploadSession::default());
        self.transport
            .send_text(chat_id, text::UPLOAD_STARTED, Some(Keyboard::semesters_with_cancel()))
            .await
    }

    /// Handles any event arriving while the chat's batch session is live.
    pub(super) async fn handle_upload_session_event(&self, chat_id: i64, event: Event) -> AppResult<()> {
        let Some(mut session) = self.sessions.upload(chat_id) else {
            // Session vanished between the dispatch check and here
            // (duplicate delivery racing a cancel); fall back to navigation.
            return self.handle_viewer_event(chat_id, event).await;
        };

        match event {
            Event::Command(Command::Cancel) => {
                // In-memory file refs are discarded; nothing was persisted.
                self.sessions.clear_upload(chat_id);
                self.transport
                    .send_text(chat_id, text::CANCELLED, Some(Keyboard::start()))
                    .await
            }
            Event::Command(Command::FinishUpload { uploader }) => {
                self.finish_upload(chat_id, session, uploader).await
            }
            Event::MenuSelection(MenuSelection::Semester(semester)) => {
                session.semester = Some(semester);
                self.sessions.set_upload(chat_id, session);
                self.transport
                    .send_text(chat_id, text::CHOOSE_COURSE, Some(Keyboard::courses_with_cancel(semester)))
                    .await
            }
            Event::MenuSelection(MenuSelection::Course(course)) => {
                let semester = session
                    .semester
                    .ok_or(AppError::IncompleteSelection(text::PICK_SEMESTER_FIRST))?;
                if !semester.has_course(course) {
                    return self
                        .transport
                        .send_text(chat_id, text::NOT_UNDERSTOOD, Some(Keyboard::courses_with_cancel(semester)))
                        .await;
                }
                session.course = Some(course.to_string());
                self.sessions.set_upload(chat_id, session);
                self.transport
                    .send_text(chat_id, &text::choose_type(course), Some(Keyboard::content_types_with_cancel()))
                    .await
            }
            Event::MenuSelection(MenuSelection::ContentType(content_type)) => {
                let course = session
                    .course
                    .clone()
                    .ok_or(AppError::IncompleteSelection(text::PICK_COURSE_FIRST))?;
                session.content_type = Some(content_type);
                self.sessions.set_upload(chat_id, session);
                self.transport
                    .send_text(
                        chat_id,
                        &text::send_files_now(&course, content_type),
                        Some(Keyboard::collecting()),
                    )
                    .await
            }
            Event::FileAttachment(attachment) => {
                let Some(content_type) = session.content_type else {
                    // A file before type selection is dropped on purpose:
                    // accepting it would classify it silently later.
                    return self.transport.send_text(chat_id, text::PICK_TYPE_FIRST, None).await;
                };
                if !content_type.accepts(attachment.kind) {
                    return Err(AppError::TypeMismatch {
                        expected: content_type,
                        received: attachment.kind,
                    });
                }
                session.files.push(attachment.file_ref);
                let count = session.files.len();
                self.sessions.set_upload(chat_id, session);
                self.transport
                    .send_text(chat_id, &text::file_accepted(count), None)
                    .await
            }
            _ => {
                self.transport
                    .send_text(chat_id, text::UPLOAD_SESSION_HINT, None)
                    .await
            }
        }
    }

    /// Persists the collected batch, one record per file, best-effort: a
    /// failed file is logged and the rest are still attempted. The session
    /// is only destroyed once the batch has been walked.
    async fn finish_upload(&self, chat_id: i64, session: UploadSession, uploader: Option<String>) -> AppResult<()> {
        let (Some(semester), Some(course), Some(content_type)) =
            (session.semester, session.course.as_deref(), session.content_type)
        else {
            return Err(AppError::IncompleteSelection(text::PICK_TYPE_FIRST));
        };
        if session.files.is_empty() {
            // Stay in the collecting state; the error boundary replies and
            // leaves the session untouched.
            return Err(AppError::IncompleteSelection(text::NO_FILES_TO_SAVE));
        }

        let total = session.files.len();
        let mut saved = 0usize;
        for file_ref in &session.files {
            match self
                .repo
                .add_material(semester, course, content_type, file_ref, uploader.as_deref())
                .await
            {
                Ok(()) => saved += 1,
                Err(err) => {
                    log::error!("Failed to save batch file {} for chat {}: {}", file_ref, chat_id, err);
                }
            }
        }

        self.sessions.clear_upload(chat_id);
        self.transport
            .send_text(chat_id, &text::batch_saved(saved, total), Some(Keyboard::start()))
            .await
    }

    /// `/addfile <semester> <course> <type> <file_ref>` — direct insert,
    /// bypassing the session flow. Exactly four arguments; anything else
    /// reports usage and writes nothing.
    pub(super) async fn handle_addfile(&self, chat_id: i64, args: &[String]) -> AppResult<()> {
        let [semester_key, course_arg, type_arg, file_ref] = args else {
            return Err(AppError::MalformedCommand {
                usage: text::ADDFILE_USAGE,
            });
        };

        let semester = Semester::parse_key(semester_key).ok_or(AppError::MalformedCommand {
            usage: text::ADDFILE_USAGE,
        })?;
        let course = semester
            .courses()
            .iter()
            .find(|c| **c == course_arg.as_str())
            .copied()
            .ok_or(AppError::MalformedCommand {
                usage: text::ADDFILE_USAGE,
            })?;
        let content_type = type_arg.parse::<ContentType>().map_err(|_| AppError::MalformedCommand {
            usage: text::ADDFILE_USAGE,
        })?;

        self.repo
            .add_material(semester, course, content_type, file_ref, None)
            .await?;
        self.transport
            .send_text(chat_id, &text::addfile_saved(course, content_type), None)
            .await
    }
}
