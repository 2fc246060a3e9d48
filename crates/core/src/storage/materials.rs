//! Material records storage module
//!
//! One physical row per uploaded file. Rows are append-only: the batch and
//! single-file registration paths never merge or overwrite an existing row
//! for the same (semester, course, content_type) key.

use rusqlite::Result;

use super::db::DbConnection;

/// Structure representing one stored material row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialRow {
    /// Unique ID of the record
    pub id: i64,
    /// Semester identifier, "1".."10"
    pub semester: String,
    /// Course name as listed in the curriculum
    pub course: String,
    /// Content type: 'pdf', 'video', 'reference'
    pub content_type: String,
    /// Opaque platform file reference used to re-send the file
    pub file_ref: String,
    /// Name of the lecturer/uploader the file is attributed to, if any
    pub uploader: Option<String>,
    /// Insertion timestamp
    pub created_at: String,
}

/// Parameters for inserting a new material row
#[derive(Debug)]
pub struct NewMaterial<'a> {
    pub semester: &'a str,
    pub course: &'a str,
    pub content_type: &'a str,
    pub file_ref: &'a str,
    pub uploader: Option<&'a str>,
}

/// Appends a new material row.
///
/// # Returns
///
/// Returns `Ok(id)` on success (ID of the inserted row) or database error.
pub fn insert_material(conn: &DbConnection, material: &NewMaterial) -> Result<i64> {
    let created_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    conn.execute(
        "INSERT INTO materials (semester, course, content_type, file_ref, uploader, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            material.semester,
            material.course,
            material.content_type,
            material.file_ref,
            material.uploader,
            created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Returns all rows matching the (semester, course, content_type) key.
///
/// Insertion order (rowid) keeps the result stable within one query; an
/// empty vec, not an error, when nothing matches.
pub fn query_materials(
    conn: &DbConnection,
    semester: &str,
    course: &str,
    content_type: &str,
) -> Result<Vec<MaterialRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, semester, course, content_type, file_ref, uploader, created_at
         FROM materials
         WHERE semester = ?1 AND course = ?2 AND content_type = ?3
         ORDER BY id",
    )?;

    let rows = stmt.query_map(rusqlite::params![semester, course, content_type], |row| {
        Ok(MaterialRow {
            id: row.get(0)?,
            semester: row.get(1)?,
            course: row.get(2)?,
            content_type: row.get(3)?,
            file_ref: row.get(4)?,
            uploader: row.get(5)?,
            created_at: row.get(6)?,
        })
    })?;

    let mut materials = Vec::new();
    for row in rows {
        materials.push(row?);
    }
    Ok(materials)
}

/// Returns the deduplicated uploader names recorded for a key.
///
/// Attribution metadata only; NULL uploaders are skipped.
pub fn distinct_uploaders(
    conn: &DbConnection,
    semester: &str,
    course: &str,
    content_type: &str,
) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT uploader FROM materials
         WHERE semester = ?1 AND course = ?2 AND content_type = ?3 AND uploader IS NOT NULL
         ORDER BY uploader",
    )?;

    let rows = stmt.query_map(rusqlite::params![semester, course, content_type], |row| {
        row.get::<_, String>(0)
    })?;

    let mut uploaders = Vec::new();
    for row in rows {
        uploaders.push(row?);
    }
    Ok(uploaders)
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
    fn insert_then_query_round_trip() {
        let (_dir, conn) = test_conn();

        let id = insert_material(
            &conn,
            &NewMaterial {
                semester: "2",
                course: "English",
                content_type: "pdf",
                file_ref: "ABC123",
                uploader: None,
            },
        )
        .unwrap();
        assert!(id > 0);

        let rows = query_materials(&conn, "2", "English", "pdf").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].file_ref, "ABC123");
        assert_eq!(rows[0].uploader, None);
    }

    #[test]
    fn same_key_keeps_every_row() {
        let (_dir, conn) = test_conn();

        for file_ref in ["f1", "f2", "f3"] {
            insert_material(
                &conn,
                &NewMaterial {
                    semester: "3",
                    course: "Pathology",
                    content_type: "reference",
                    file_ref,
                    uploader: Some("د. أحمد"),
                },
            )
            .unwrap();
        }

        let rows = query_materials(&conn, "3", "Pathology", "reference").unwrap();
        assert_eq!(rows.len(), 3);
        // Stable insertion order within one query.
        let refs: Vec<_> = rows.iter().map(|r| r.file_ref.as_str()).collect();
        assert_eq!(refs, vec!["f1", "f2", "f3"]);
    }

    #[test]
    fn altered_key_misses() {
        let (_dir, conn) = test_conn();

        insert_material(
            &conn,
            &NewMaterial {
                semester: "2",
                course: "English",
                content_type: "pdf",
                file_ref: "ABC123",
                uploader: None,
            },
        )
        .unwrap();

        assert!(query_materials(&conn, "3", "English", "pdf").unwrap().is_empty());
        assert!(query_materials(&conn, "2", "Histology", "pdf").unwrap().is_empty());
        assert!(query_materials(&conn, "2", "English", "video").unwrap().is_empty());
    }

    #[test]
    fn uploaders_deduplicated() {
        let (_dir, conn) = test_conn();

        for (file_ref, uploader) in [("a", Some("د. أحمد")), ("b", Some("د. أحمد")), ("c", Some("د. سارة")), ("d", None)] {
            insert_material(
                &conn,
                &NewMaterial {
                    semester: "1",
                    course: "Anatomy",
                    content_type: "pdf",
                    file_ref,
                    uploader,
                },
            )
            .unwrap();
        }

        let uploaders = distinct_uploaders(&conn, "1", "Anatomy", "pdf").unwrap();
        assert_eq!(uploaders.len(), 2);
        assert!(uploaders.contains(&"د. أحمد".to_string()));
        assert!(uploaders.contains(&"د. سارة".to_string()));
    }
}
