//! Pending-upload storage module
//!
//! At most one pending upload per chat (chat_id is the primary key). The
//! row is a transient staging area: created when a chat enters awaiting-file
//! mode, patched field by field, deleted on promotion or cancel.

use rusqlite::Result;

use super::db::DbConnection;

/// Structure representing a chat's pending-upload row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRow {
    pub chat_id: i64,
    pub file_ref: Option<String>,
    pub content_type: Option<String>,
    pub uploader: Option<String>,
    pub created_at: String,
}

/// Creates the pending row for a chat if none exists; no-op otherwise.
pub fn ensure_pending(conn: &DbConnection, chat_id: i64) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO pending_uploads (chat_id) VALUES (?1)",
        rusqlite::params![chat_id],
    )?;
    Ok(())
}

/// Deletes the pending row for a chat; safe to call when none exists.
pub fn delete_pending(conn: &DbConnection, chat_id: i64) -> Result<()> {
    conn.execute(
        "DELETE FROM pending_uploads WHERE chat_id = ?1",
        rusqlite::params![chat_id],
    )?;
    Ok(())
}

/// Returns the pending row for a chat, if any.
pub fn get_pending(conn: &DbConnection, chat_id: i64) -> Result<Option<PendingRow>> {
    let mut stmt = conn.prepare(
        "SELECT chat_id, file_ref, content_type, uploader, created_at
         FROM pending_uploads WHERE chat_id = ?1",
    )?;
    let mut rows = stmt.query(rusqlite::params![chat_id])?;

    if let Some(row) = rows.next()? {
        Ok(Some(PendingRow {
            chat_id: row.get(0)?,
            file_ref: row.get(1)?,
            content_type: row.get(2)?,
            uploader: row.get(3)?,
            created_at: row.get(4)?,
        }))
    } else {
        Ok(None)
    }
}

/// Sets (or overwrites, last write wins) the file fields of a chat's
/// pending row.
///
/// # Returns
///
/// `Ok(true)` if a row was updated, `Ok(false)` if the chat has no pending
/// row.
pub fn set_pending_file(conn: &DbConnection, chat_id: i64, file_ref: &str, content_type: &str) -> Result<bool> {
    let updated = conn.execute(
        "UPDATE pending_uploads SET file_ref = ?1, content_type = ?2 WHERE chat_id = ?3",
        rusqlite::params![file_ref, content_type, chat_id],
    )?;
    Ok(updated > 0)
}

/// Sets (or overwrites) the uploader name of a chat's pending row.
///
/// Same return contract as [`set_pending_file`].
pub fn set_pending_uploader(conn: &DbConnection, chat_id: i64, uploader: &str) -> Result<bool> {
    let updated = conn.execute(
        "UPDATE pending_uploads SET uploader = ?1 WHERE chat_id = ?2",
        rusqlite::params![uploader, chat_id],
    )?;
    Ok(updated > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::create_pool;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn test_conn() -> (TempDir, DbConnection) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.sqlite");
        let pool = create_pool(path.to_str().unwrap()).unwrap();
        let conn = pool.get().unwrap();
        (dir, conn)
    }

    #[test]
    fn ensure_is_idempotent() {
        let (_dir, conn) = test_conn();

        ensure_pending(&conn, 7).unwrap();
        set_pending_file(&conn, 7, "F1", "pdf").unwrap();
        // A second ensure must not reset the already-attached file.
        ensure_pending(&conn, 7).unwrap();

        let row = get_pending(&conn, 7).unwrap().unwrap();
        assert_eq!(row.file_ref.as_deref(), Some("F1"));
    }

    #[test]
    fn delete_is_idempotent() {
        let (_dir, conn) = test_conn();

        delete_pending(&conn, 7).unwrap();
        ensure_pending(&conn, 7).unwrap();
        delete_pending(&conn, 7).unwrap();
        assert_eq!(get_pending(&conn, 7).unwrap(), None);
    }

    #[test]
    fn patch_without_row_reports_missing() {
        let (_dir, conn) = test_conn();

        assert!(!set_pending_file(&conn, 7, "F1", "pdf").unwrap());
        assert!(!set_pending_uploader(&conn, 7, "د. أحمد").unwrap());
    }

    #[test]
    fn patches_overwrite_last_write_wins() {
        let (_dir, conn) = test_conn();

        ensure_pending(&conn, 7).unwrap();
        assert!(set_pending_file(&conn, 7, "F1", "pdf").unwrap());
        assert!(set_pending_file(&conn, 7, "F2", "video").unwrap());
        assert!(set_pending_uploader(&conn, 7, "د. أحمد").unwrap());

        let row = get_pending(&conn, 7).unwrap().unwrap();
        assert_eq!(row.file_ref.as_deref(), Some("F2"));
        assert_eq!(row.content_type.as_deref(), Some("video"));
        assert_eq!(row.uploader.as_deref(), Some("د. أحمد"));
    }
}
