//! Inbound event model, classification, and the seams to the outside world.
//!
//! The transport adapter hands the controller an [`InboundEvent`]; before
//! dispatch it is classified into exactly one [`Event`] variant, so string
//! matching against menu labels happens in one place and the state machine
//! works on tagged values only.

use async_trait::async_trait;

use crate::config;
use crate::error::AppResult;
use crate::keyboard::Keyboard;
use crate::taxonomy::{self, ContentType, MediaKind, Semester};
use crate::text::labels;

/// Who sent the event, as far as the platform tells us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderIdentity {
    pub user_id: i64,
    /// Platform handle (username without @), when the sender has one.
    pub handle: Option<String>,
}

/// An inbound file reference with its platform media kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_ref: String,
    pub kind: MediaKind,
}

/// One webhook delivery, already parsed out of the platform payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub chat_id: i64,
    pub sender: SenderIdentity,
    pub text: Option<String>,
    pub attachment: Option<Attachment>,
    pub button_payload: Option<String>,
}

impl InboundEvent {
    /// Button payload and text are equivalent dispatch keys; the payload
    /// wins when both are present.
    pub fn label(&self) -> Option<&str> {
        self.button_payload.as_deref().or(self.text.as_deref())
    }
}

/// Slash commands and fixed-label commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Begin,
    Home,
    Back,
    /// Operator: open a fresh batch-upload session.
    UploadNew,
    /// Operator: persist the collected batch; optional uploader attribution.
    FinishUpload { uploader: Option<String> },
    Cancel,
    /// Any chat: enter single-file registration mode.
    Register,
    /// Operator: direct insert, args still unvalidated (arity is checked at
    /// dispatch so the role check can happen first).
    AddFile { args: Vec<String> },
}

/// A recognized menu button press (or its typed-out label).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuSelection {
    Semester(Semester),
    Course(&'static str),
    ContentType(ContentType),
}

/// Every inbound event, classified into exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command(Command),
    MenuSelection(MenuSelection),
    FileAttachment(Attachment),
    FreeText(String),
}

/// Classifies an inbound event. Attachments win over text, commands over
/// menu labels, menu labels over free text; anything unrecognized falls
/// through to `FreeText`.
pub fn classify(event: &InboundEvent) -> Event {
    if let Some(attachment) = &event.attachment {
        return Event::FileAttachment(attachment.clone());
    }

    let label = match event.label() {
        Some(l) => l.trim(),
        None => return Event::FreeText(String::new()),
    };

    if label.starts_with('/') {
        return classify_command(label);
    }

    match label {
        l if l == labels::BEGIN => return Event::Command(Command::Begin),
        l if l == labels::HOME => return Event::Command(Command::Home),
        l if l == labels::BACK => return Event::Command(Command::Back),
        l if l == labels::FINISH => return Event::Command(Command::FinishUpload { uploader: None }),
        l if l == labels::CANCEL => return Event::Command(Command::Cancel),
        _ => {}
    }

    if let Some(semester) = Semester::from_label(label) {
        return Event::MenuSelection(MenuSelection::Semester(semester));
    }
    if let Some((_, course)) = taxonomy::find_course(label) {
        return Event::MenuSelection(MenuSelection::Course(course));
    }
    if let Some(content_type) = ContentType::from_label(label) {
        return Event::MenuSelection(MenuSelection::ContentType(content_type));
    }

    Event::FreeText(label.to_string())
}

fn classify_command(label: &str) -> Event {
    let mut parts = label.split_whitespace();
    let head = parts.next().unwrap_or_default();
    // "/cmd@botname" arrives in group chats
    let head = head.split('@').next().unwrap_or(head);

    match head {
        "/start" => Event::Command(Command::Start),
        "/help" => Event::Command(Command::Help),
        "/upload" => Event::Command(Command::UploadNew),
        "/done" => {
            let rest = parts.collect::<Vec<_>>().join(" ");
            let uploader = (!rest.is_empty()).then_some(rest);
            Event::Command(Command::FinishUpload { uploader })
        }
        "/cancel" => Event::Command(Command::Cancel),
        "/register" => Event::Command(Command::Register),
        "/addfile" => Event::Command(Command::AddFile {
            args: parts.map(str::to_string).collect(),
        }),
        _ => Event::FreeText(label.to_string()),
    }
}

/// Outbound side-effects the controller may issue. Fire-and-forget for
/// state purposes: a delivery failure never feeds back into transitions.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str, keyboard: Option<Keyboard>) -> AppResult<()>;

    async fn send_file(&self, chat_id: i64, file_ref: &str, kind: MediaKind, caption: Option<&str>) -> AppResult<()>;
}

/// What a sender is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Operator,
    Viewer,
}

/// Resolves a sender to a role. Only one role hierarchy exists today (a
/// single operator handle), but the controller never compares identities
/// itself.
pub trait RoleProvider: Send + Sync {
    fn role_of(&self, sender: &SenderIdentity) -> Role;
}

/// The single configured operator handle.
pub struct StaticOperator {
    handle: String,
}

impl StaticOperator {
    pub fn new(handle: impl Into<String>) -> Self {
        Self { handle: handle.into() }
    }

    /// Reads OPERATOR_HANDLE from the environment-backed config.
    pub fn from_env() -> Self {
        Self::new(config::operator::OPERATOR_HANDLE.clone())
    }
}

impl RoleProvider for StaticOperator {
    fn role_of(&self, sender: &SenderIdentity) -> Role {
        let is_operator = !self.handle.is_empty()
            && sender
                .handle
                .as_deref()
                .is_some_and(|h| h.eq_ignore_ascii_case(&self.handle));
        if is_operator {
            Role::Operator
        } else {
            Role::Viewer
        }
    }
}
