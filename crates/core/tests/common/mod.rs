//! Shared test fixtures: a recording fake transport and a controller
//! harness backed by a throwaway SQLite database.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::Mutex;

use muqarrar_core::error::AppResult;
use muqarrar_core::event::{Attachment, InboundEvent, SenderIdentity, StaticOperator, Transport};
use muqarrar_core::keyboard::Keyboard;
use muqarrar_core::taxonomy::MediaKind;
use muqarrar_core::{Controller, SessionStore, SqliteRepository};

/// The handle the harness configures as the operator.
pub const OPERATOR_HANDLE: &str = "uni_admin";

/// One recorded outbound action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text {
        chat_id: i64,
        text: String,
        keyboard: Option<Keyboard>,
    },
    File {
        chat_id: i64,
        file_ref: String,
        kind: MediaKind,
        caption: Option<String>,
    },
}

/// Transport fake that records every send instead of delivering it.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Outbound>>,
}

impl RecordingTransport {
    /// Drains and returns everything sent since the last call.
    pub async fn take(&self) -> Vec<Outbound> {
        std::mem::take(&mut *self.sent.lock().await)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_text(&self, chat_id: i64, text: &str, keyboard: Option<Keyboard>) -> AppResult<()> {
        self.sent.lock().await.push(Outbound::Text {
            chat_id,
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }

    async fn send_file(&self, chat_id: i64, file_ref: &str, kind: MediaKind, caption: Option<&str>) -> AppResult<()> {
        self.sent.lock().await.push(Outbound::File {
            chat_id,
            file_ref: file_ref.to_string(),
            kind,
            caption: caption.map(str::to_string),
        });
        Ok(())
    }
}

pub struct Harness {
    pub controller: Controller<SqliteRepository, RecordingTransport>,
    pub transport: Arc<RecordingTransport>,
    pub repo: Arc<SqliteRepository>,
    pub sessions: Arc<SessionStore>,
    _dir: TempDir,
}

pub fn harness() -> Harness {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bot.sqlite");
    let repo = Arc::new(SqliteRepository::open(path.to_str().unwrap()).unwrap());
    let transport = Arc::new(RecordingTransport::default());
    let sessions = Arc::new(SessionStore::new());
    let controller = Controller::new(
        Arc::clone(&repo),
        Arc::clone(&transport),
        Arc::clone(&sessions),
        Arc::new(StaticOperator::new(OPERATOR_HANDLE)),
    );
    Harness {
        controller,
        transport,
        repo,
        sessions,
        _dir: dir,
    }
}

fn event(chat_id: i64, handle: Option<&str>) -> InboundEvent {
    InboundEvent {
        chat_id,
        sender: SenderIdentity {
            user_id: chat_id,
            handle: handle.map(str::to_string),
        },
        text: None,
        attachment: None,
        button_payload: None,
    }
}

pub fn viewer_text(chat_id: i64, text: &str) -> InboundEvent {
    let mut e = event(chat_id, Some("student"));
    e.text = Some(text.to_string());
    e
}

pub fn operator_text(chat_id: i64, text: &str) -> InboundEvent {
    let mut e = event(chat_id, Some(OPERATOR_HANDLE));
    e.text = Some(text.to_string());
    e
}

pub fn viewer_file(chat_id: i64, file_ref: &str, kind: MediaKind) -> InboundEvent {
    let mut e = event(chat_id, Some("student"));
    e.attachment = Some(Attachment {
        file_ref: file_ref.to_string(),
        kind,
    });
    e
}

pub fn operator_file(chat_id: i64, file_ref: &str, kind: MediaKind) -> InboundEvent {
    let mut e = event(chat_id, Some(OPERATOR_HANDLE));
    e.attachment = Some(Attachment {
        file_ref: file_ref.to_string(),
        kind,
    });
    e
}

/// The text of the last outbound action, which must be a text send.
pub fn last_text(sent: &[Outbound]) -> &str {
    match sent.last() {
        Some(Outbound::Text { text, .. }) => text,
        other => panic!("expected a trailing text send, got {other:?}"),
    }
}
