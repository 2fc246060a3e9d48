//! Per-chat in-memory session state.
//!
//! Two independent chat-keyed namespaces: the viewer's navigation position
//! and the operator's batch-upload session. Entries live for the process
//! lifetime and are only cleared on explicit navigation-to-root or cancel;
//! absence means "no entry", never an error. Values are cloned out of the
//! map on read, so a concurrent duplicate webhook delivery can at worst
//! lose a write (last write wins), never observe a half-updated struct.

use dashmap::DashMap;

use crate::taxonomy::{ContentType, Semester};

/// Where a viewer currently is in the semester → course → type menu.
///
/// `course` set implies `semester` set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerSessionState {
    pub semester: Option<Semester>,
    pub course: Option<String>,
}

impl ViewerSessionState {
    pub fn is_root(&self) -> bool {
        self.semester.is_none() && self.course.is_none()
    }
}

/// Operator-only multi-file registration flow sharing one classification.
///
/// `files` is non-empty only after at least one accepted file, which in turn
/// requires `content_type` to be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSession {
    pub semester: Option<Semester>,
    pub course: Option<String>,
    pub content_type: Option<ContentType>,
    pub files: Vec<String>,
}

impl UploadSession {
    /// True once the classification is complete and files are accepted.
    pub fn is_collecting(&self) -> bool {
        self.content_type.is_some()
    }
}

/// Process-wide chat-keyed store for both session namespaces.
#[derive(Debug, Default)]
pub struct SessionStore {
    viewers: DashMap<i64, ViewerSessionState>,
    uploads: DashMap<i64, UploadSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The chat's navigation state; ROOT when no entry exists.
    pub fn viewer(&self, chat_id: i64) -> ViewerSessionState {
        self.viewers.get(&chat_id).map(|s| s.value().clone()).unwrap_or_default()
    }

    pub fn set_viewer(&self, chat_id: i64, state: ViewerSessionState) {
        self.viewers.insert(chat_id, state);
    }

    pub fn clear_viewer(&self, chat_id: i64) {
        self.viewers.remove(&chat_id);
    }

    pub fn upload(&self, chat_id: i64) -> Option<UploadSession> {
        self.uploads.get(&chat_id).map(|s| s.value().clone())
    }

    pub fn set_upload(&self, chat_id: i64, session: UploadSession) {
        self.uploads.insert(chat_id, session);
    }

    pub fn clear_upload(&self, chat_id: i64) {
        self.uploads.remove(&chat_id);
    }

    pub fn has_upload(&self, chat_id: i64) -> bool {
        self.uploads.contains_key(&chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_viewer_entry_is_root() {
        let store = SessionStore::new();
        assert!(store.viewer(1).is_root());
    }

    #[test]
    fn namespaces_are_independent() {
        let store = SessionStore::new();
        store.set_viewer(
            1,
            ViewerSessionState {
                semester: Semester::new(2),
                course: None,
            },
        );
        assert!(store.upload(1).is_none());

        store.set_upload(1, UploadSession::default());
        store.clear_viewer(1);
        assert!(store.has_upload(1));
        assert!(store.viewer(1).is_root());
    }

    #[test]
    fn upload_session_last_write_wins() {
        let store = SessionStore::new();
        let mut session = UploadSession::default();
        session.content_type = Some(ContentType::Video);
        store.set_upload(5, session.clone());

        session.files.push("F1".to_string());
        store.set_upload(5, session);

        let read = store.upload(5).unwrap();
        assert_eq!(read.files, vec!["F1".to_string()]);
        assert!(read.is_collecting());
    }

    #[test]
    fn clear_removes_entry() {
        let store = SessionStore::new();
        store.set_upload(9, UploadSession::default());
        store.clear_upload(9);
        assert!(!store.has_upload(9));
        // Clearing an absent entry is a no-op, not an error.
        store.clear_upload(9);
    }
}
