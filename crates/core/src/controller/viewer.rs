//! Viewer navigation flow: ROOT → semester → course → fetch & send.

use crate::error::{AppError, AppResult};
use crate::event::{Command, Event, MenuSelection, Transport};
use crate::keyboard::Keyboard;
use crate::repository::MaterialRepository;
use crate::session::ViewerSessionState;
use crate::taxonomy::ContentType;
use crate::text;

use super::Controller;

impl<R: MaterialRepository, T: Transport> Controller<R, T> {
    pub(super) async fn handle_viewer_event(&self, chat_id: i64, event: Event) -> AppResult<()> {
        match event {
            Event::Command(Command::Start) => {
                self.sessions.clear_viewer(chat_id);
                self.transport
                    .send_text(chat_id, text::WELCOME, Some(Keyboard::start()))
                    .await
            }
            Event::Command(Command::Help) => self.transport.send_text(chat_id, text::HELP, None).await,
            Event::Command(Command::Begin) => {
                self.sessions.clear_viewer(chat_id);
                self.transport
                    .send_text(chat_id, text::CHOOSE_SEMESTER, Some(Keyboard::semesters()))
                    .await
            }
            Event::Command(Command::Home) => {
                self.sessions.clear_viewer(chat_id);
                self.transport
                    .send_text(chat_id, text::BACK_HOME, Some(Keyboard::start()))
                    .await
            }
            Event::Command(Command::Back) => self.viewer_back(chat_id).await,
            Event::Command(Command::Cancel) => {
                self.transport.send_text(chat_id, text::NOTHING_TO_CANCEL, None).await
            }
            Event::MenuSelection(MenuSelection::Semester(semester)) => {
                self.sessions.set_viewer(
                    chat_id,
                    ViewerSessionState {
                        semester: Some(semester),
                        course: None,
                    },
                );
                self.transport
                    .send_text(chat_id, text::CHOOSE_COURSE, Some(Keyboard::courses(semester)))
                    .await
            }
            Event::MenuSelection(MenuSelection::Course(course)) => {
                let mut state = self.sessions.viewer(chat_id);
                let semester = state
                    .semester
                    .ok_or(AppError::IncompleteSelection(text::PICK_SEMESTER_FIRST))?;
                if !semester.has_course(course) {
                    // Valid course name, wrong semester: not a transition.
                    return self
                        .transport
                        .send_text(chat_id, text::NOT_UNDERSTOOD, Some(Keyboard::courses(semester)))
                        .await;
                }
                state.course = Some(course.to_string());
                self.sessions.set_viewer(chat_id, state);
                self.transport
                    .send_text(chat_id, &text::choose_type(course), Some(Keyboard::content_types()))
                    .await
            }
            Event::MenuSelection(MenuSelection::ContentType(content_type)) => {
                self.send_materials(chat_id, content_type).await
            }
            Event::FileAttachment(_) => self.transport.send_text(chat_id, text::REGISTER_HINT, None).await,
            Event::Command(Command::FinishUpload { .. }) | Event::FreeText(_) => {
                self.transport.send_text(chat_id, text::NOT_UNDERSTOOD, None).await
            }
            // Operator entry points and /register never reach the viewer flow.
            Event::Command(Command::UploadNew)
            | Event::Command(Command::AddFile { .. })
            | Event::Command(Command::Register) => {
                self.transport.send_text(chat_id, text::NOT_UNDERSTOOD, None).await
            }
        }
    }

    /// Pops one navigation level; back at ROOT just re-renders the semester
    /// menu.
    async fn viewer_back(&self, chat_id: i64) -> AppResult<()> {
        let mut state = self.sessions.viewer(chat_id);
        if state.course.take().is_some() {
            self.sessions.set_viewer(chat_id, state.clone());
            // Course cleared; back to choosing a course in the semester.
            if let Some(semester) = state.semester {
                return self
                    .transport
                    .send_text(chat_id, text::CHOOSE_COURSE, Some(Keyboard::courses(semester)))
                    .await;
            }
        }
        self.sessions.clear_viewer(chat_id);
        self.transport
            .send_text(chat_id, text::CHOOSE_SEMESTER, Some(Keyboard::semesters()))
            .await
    }

    /// Fetches and sends every stored file for the chat's (semester, course)
    /// plus the picked type. State stays where it is, so the viewer can pick
    /// another type straight away.
    async fn send_materials(&self, chat_id: i64, content_type: ContentType) -> AppResult<()> {
        let state = self.sessions.viewer(chat_id);
        let semester = state
            .semester
            .ok_or(AppError::IncompleteSelection(text::PICK_SEMESTER_FIRST))?;
        let course = state
            .course
            .ok_or(AppError::IncompleteSelection(text::PICK_COURSE_FIRST))?;

        let records = self.repo.get_materials(semester, &course, content_type).await?;
        if records.is_empty() {
            return self.transport.send_text(chat_id, text::NOT_AVAILABLE, None).await;
        }

        let uploaders = self.repo.list_uploaders(semester, &course, content_type).await?;
        self.transport
            .send_text(chat_id, &text::sending(content_type, &course, &uploaders), None)
            .await?;

        for record in &records {
            let caption = text::file_caption(&course, content_type, record.uploader.as_deref());
            self.transport
                .send_file(chat_id, &record.file_ref, content_type.media_kind(), Some(&caption))
                .await?;
        }
        Ok(())
    }
}
