//! Material repository contract and SQLite implementation.
//!
//! The controller only ever talks to [`MaterialRepository`]; the backing
//! implementation is swappable as long as it honors the contract (append-only
//! material rows, at most one pending upload per chat, idempotent pending
//! set/clear, positive acknowledgement before a write may be assumed
//! durable).

use std::collections::BTreeSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::storage::{self, get_connection, materials, pending, DbConnection, DbPool};
use crate::taxonomy::{ContentType, Semester};

/// One persisted, retrievable content entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialRecord {
    pub semester: Semester,
    pub course: String,
    pub content_type: ContentType,
    pub file_ref: String,
    pub uploader: Option<String>,
    pub created_at: String,
}

/// A file received but not yet classified into semester/course/type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub chat_id: i64,
    pub file_ref: Option<String>,
    pub content_type: Option<ContentType>,
    pub uploader: Option<String>,
}

/// Durable store of material records and per-chat pending uploads.
#[async_trait]
pub trait MaterialRepository: Send + Sync {
    /// Appends a new material record; never merges with existing rows.
    async fn add_material(
        &self,
        semester: Semester,
        course: &str,
        content_type: ContentType,
        file_ref: &str,
        uploader: Option<&str>,
    ) -> AppResult<()>;

    /// All records matching the key; empty vec when nothing matches.
    async fn get_materials(
        &self,
        semester: Semester,
        course: &str,
        content_type: ContentType,
    ) -> AppResult<Vec<MaterialRecord>>;

    /// Deduplicated uploader names recorded for the key (attribution only).
    async fn list_uploaders(
        &self,
        semester: Semester,
        course: &str,
        content_type: ContentType,
    ) -> AppResult<BTreeSet<String>>;

    /// Puts the chat into awaiting-file mode; no-op if already pending.
    async fn set_pending_upload(&self, chat_id: i64) -> AppResult<()>;

    /// Removes the chat's pending upload; safe to call when none exists.
    async fn clear_pending_upload(&self, chat_id: i64) -> AppResult<()>;

    /// Sets/overwrites the file on the chat's pending upload.
    ///
    /// # Errors
    ///
    /// `AppError::NoPendingUpload` when the chat has none.
    async fn attach_file_to_pending(&self, chat_id: i64, file_ref: &str, content_type: ContentType) -> AppResult<()>;

    /// Sets/overwrites the uploader name on the chat's pending upload.
    ///
    /// # Errors
    ///
    /// `AppError::NoPendingUpload` when the chat has none.
    async fn attach_uploader_to_pending(&self, chat_id: i64, uploader: &str) -> AppResult<()>;

    async fn get_pending_upload(&self, chat_id: i64) -> AppResult<Option<PendingUpload>>;

    async fn has_pending_upload(&self, chat_id: i64) -> AppResult<bool>;
}

/// SQLite-backed repository.
pub struct SqliteRepository {
    pool: DbPool,
    // Serializes every mutating store operation within this process for the
    // duration of its round-trip. Two processes sharing one database file can
    // still interleave a read-modify-write on the pending row and lose an
    // update; that gap is accepted and documented in DESIGN.md rather than
    // papered over here.
    write_lock: Mutex<()>,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            write_lock: Mutex::new(()),
        }
    }

    /// Opens (or creates) the database at `path` and migrates the schema.
    pub fn open(path: &str) -> AppResult<Self> {
        Ok(Self::new(storage::create_pool(path)?))
    }

    fn conn(&self) -> AppResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

fn record_from_row(row: materials::MaterialRow) -> AppResult<MaterialRecord> {
    let semester = Semester::parse_key(&row.semester)
        .ok_or_else(|| AppError::StorageUnavailable(format!("malformed semester value: {}", row.semester)))?;
    let content_type = row
        .content_type
        .parse::<ContentType>()
        .map_err(|_| AppError::StorageUnavailable(format!("malformed content type value: {}", row.content_type)))?;

    Ok(MaterialRecord {
        semester,
        course: row.course,
        content_type,
        file_ref: row.file_ref,
        uploader: row.uploader,
        created_at: row.created_at,
    })
}

fn pending_from_row(row: pending::PendingRow) -> AppResult<PendingUpload> {
    let content_type = match row.content_type {
        Some(raw) => Some(
            raw.parse::<ContentType>()
                .map_err(|_| AppError::StorageUnavailable(format!("malformed content type value: {raw}")))?,
        ),
        None => None,
    };

    Ok(PendingUpload {
        chat_id: row.chat_id,
        file_ref: row.file_ref,
        content_type,
        uploader: row.uploader,
    })
}

#[async_trait]
impl MaterialRepository for SqliteRepository {
    async fn add_material(
        &self,
        semester: Semester,
        course: &str,
        content_type: ContentType,
        file_ref: &str,
        uploader: Option<&str>,
    ) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let conn = self.conn()?;
        let id = materials::insert_material(
            &conn,
            &materials::NewMaterial {
                semester: &semester.key(),
                course,
                content_type: &content_type.to_string(),
                file_ref,
                uploader,
            },
        )?;
        log::info!(
            "Material saved: id={}, semester={}, course={}, type={}",
            id,
            semester,
            course,
            content_type
        );
        Ok(())
    }

    async fn get_materials(
        &self,
        semester: Semester,
        course: &str,
        content_type: ContentType,
    ) -> AppResult<Vec<MaterialRecord>> {
        let conn = self.conn()?;
        let rows = materials::query_materials(&conn, &semester.key(), course, &content_type.to_string())?;
        rows.into_iter().map(record_from_row).collect()
    }

    async fn list_uploaders(
        &self,
        semester: Semester,
        course: &str,
        content_type: ContentType,
    ) -> AppResult<BTreeSet<String>> {
        let conn = self.conn()?;
        let uploaders = materials::distinct_uploaders(&conn, &semester.key(), course, &content_type.to_string())?;
        Ok(uploaders.into_iter().collect())
    }

    async fn set_pending_upload(&self, chat_id: i64) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let conn = self.conn()?;
        pending::ensure_pending(&conn, chat_id)?;
        Ok(())
    }

    async fn clear_pending_upload(&self, chat_id: i64) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let conn = self.conn()?;
        pending::delete_pending(&conn, chat_id)?;
        Ok(())
    }

    async fn attach_file_to_pending(&self, chat_id: i64, file_ref: &str, content_type: ContentType) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let conn = self.conn()?;
        if !pending::set_pending_file(&conn, chat_id, file_ref, &content_type.to_string())? {
            return Err(AppError::NoPendingUpload(chat_id));
        }
        Ok(())
    }

    async fn attach_uploader_to_pending(&self, chat_id: i64, uploader: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let conn = self.conn()?;
        if !pending::set_pending_uploader(&conn, chat_id, uploader)? {
            return Err(AppError::NoPendingUpload(chat_id));
        }
        Ok(())
    }

    async fn get_pending_upload(&self, chat_id: i64) -> AppResult<Option<PendingUpload>> {
        let conn = self.conn()?;
        match pending::get_pending(&conn, chat_id)? {
            Some(row) => Ok(Some(pending_from_row(row)?)),
            None => Ok(None),
        }
    }

    async fn has_pending_upload(&self, chat_id: i64) -> AppResult<bool> {
        let conn = self.conn()?;
        Ok(pending::get_pending(&conn, chat_id)?.is_some())
    }
}
