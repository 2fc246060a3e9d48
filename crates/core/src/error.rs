use thiserror::Error;

use crate::taxonomy::{ContentType, MediaKind};

/// Centralized error types for the application
///
/// Every failure a conversation turn can produce is converted to this enum;
/// the controller catches it at the event boundary and turns it into a
/// user-visible reply without resetting the chat's session state.
#[derive(Error, Debug)]
pub enum AppError {
    /// Backing store unreachable, locked out, or returned a malformed row
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Pending-upload operation on a chat that has no pending upload
    #[error("no pending upload for chat {0}")]
    NoPendingUpload(i64),

    /// Attachment media kind disagrees with the declared upload type
    #[error("attachment kind {received} does not match declared type {expected}")]
    TypeMismatch {
        expected: ContentType,
        received: MediaKind,
    },

    /// A step was taken before the steps it depends on (course before
    /// semester, finish with no files, ...)
    #[error("incomplete selection: {0}")]
    IncompleteSelection(&'static str),

    /// Administrative command with the wrong shape
    #[error("malformed command, usage: {usage}")]
    MalformedCommand { usage: &'static str },

    /// Outbound send to the messaging platform failed
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::StorageUnavailable(err.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::StorageUnavailable(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StorageUnavailable(err.to_string())
    }
}
