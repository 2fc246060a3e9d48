//! Repository contract tests against the SQLite implementation.

use muqarrar_core::error::AppError;
use muqarrar_core::repository::{MaterialRepository, SqliteRepository};
use muqarrar_core::taxonomy::{ContentType, Semester};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn repo() -> (TempDir, SqliteRepository) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("repo.sqlite");
    let repo = SqliteRepository::open(path.to_str().unwrap()).unwrap();
    (dir, repo)
}

fn sem(n: u8) -> Semester {
    Semester::new(n).unwrap()
}

#[tokio::test]
async fn saved_material_is_retrievable_by_its_exact_key_only() {
    let (_dir, repo) = repo();
    repo.add_material(sem(2), "English", ContentType::Pdf, "ABC123", None)
        .await
        .unwrap();

    let records = repo.get_materials(sem(2), "English", ContentType::Pdf).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].file_ref, "ABC123");
    assert_eq!(records[0].semester, sem(2));
    assert_eq!(records[0].content_type, ContentType::Pdf);

    // Any one field altered misses.
    assert!(repo.get_materials(sem(3), "English", ContentType::Pdf).await.unwrap().is_empty());
    assert!(repo.get_materials(sem(2), "Histology", ContentType::Pdf).await.unwrap().is_empty());
    assert!(repo
        .get_materials(sem(2), "English", ContentType::Video)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn add_material_appends_instead_of_merging() {
    let (_dir, repo) = repo();
    repo.add_material(sem(3), "Pathology", ContentType::Reference, "R1", Some("د. أحمد"))
        .await
        .unwrap();
    repo.add_material(sem(3), "Pathology", ContentType::Reference, "R2", Some("د. أحمد"))
        .await
        .unwrap();

    let records = repo
        .get_materials(sem(3), "Pathology", ContentType::Reference)
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    // Stable order within one query.
    assert_eq!(records[0].file_ref, "R1");
    assert_eq!(records[1].file_ref, "R2");
}

#[tokio::test]
async fn list_uploaders_deduplicates() {
    let (_dir, repo) = repo();
    for (file_ref, uploader) in [("a", Some("د. أحمد")), ("b", Some("د. سارة")), ("c", Some("د. أحمد")), ("d", None)] {
        repo.add_material(sem(1), "Anatomy", ContentType::Pdf, file_ref, uploader)
            .await
            .unwrap();
    }

    let uploaders = repo.list_uploaders(sem(1), "Anatomy", ContentType::Pdf).await.unwrap();
    assert_eq!(uploaders.len(), 2);
    assert!(uploaders.contains("د. أحمد"));
    assert!(uploaders.contains("د. سارة"));
}

#[tokio::test]
async fn pending_upload_lifecycle() {
    let (_dir, repo) = repo();
    let chat = 42;

    assert!(!repo.has_pending_upload(chat).await.unwrap());
    assert_eq!(repo.get_pending_upload(chat).await.unwrap(), None);

    repo.set_pending_upload(chat).await.unwrap();
    assert!(repo.has_pending_upload(chat).await.unwrap());

    repo.attach_file_to_pending(chat, "F1", ContentType::Pdf).await.unwrap();
    repo.attach_uploader_to_pending(chat, "د. أحمد").await.unwrap();

    // set_pending_upload is idempotent: the filled fields survive.
    repo.set_pending_upload(chat).await.unwrap();
    let pending = repo.get_pending_upload(chat).await.unwrap().unwrap();
    assert_eq!(pending.file_ref.as_deref(), Some("F1"));
    assert_eq!(pending.content_type, Some(ContentType::Pdf));
    assert_eq!(pending.uploader.as_deref(), Some("د. أحمد"));

    repo.clear_pending_upload(chat).await.unwrap();
    assert!(!repo.has_pending_upload(chat).await.unwrap());
    // Clearing again is a no-op, not an error.
    repo.clear_pending_upload(chat).await.unwrap();
}

#[tokio::test]
async fn attach_without_pending_fails() {
    let (_dir, repo) = repo();

    let err = repo.attach_file_to_pending(7, "F1", ContentType::Pdf).await.unwrap_err();
    assert!(matches!(err, AppError::NoPendingUpload(7)));

    let err = repo.attach_uploader_to_pending(7, "د. أحمد").await.unwrap_err();
    assert!(matches!(err, AppError::NoPendingUpload(7)));
}

#[tokio::test]
async fn attach_overwrites_last_write_wins() {
    let (_dir, repo) = repo();
    repo.set_pending_upload(9).await.unwrap();

    repo.attach_file_to_pending(9, "F1", ContentType::Pdf).await.unwrap();
    repo.attach_file_to_pending(9, "F2", ContentType::Video).await.unwrap();

    let pending = repo.get_pending_upload(9).await.unwrap().unwrap();
    assert_eq!(pending.file_ref.as_deref(), Some("F2"));
    assert_eq!(pending.content_type, Some(ContentType::Video));
}

#[tokio::test]
async fn pending_uploads_are_isolated_per_chat() {
    let (_dir, repo) = repo();
    repo.set_pending_upload(1).await.unwrap();
    repo.set_pending_upload(2).await.unwrap();

    repo.attach_file_to_pending(1, "F1", ContentType::Pdf).await.unwrap();
    repo.clear_pending_upload(2).await.unwrap();

    assert!(repo.has_pending_upload(1).await.unwrap());
    assert!(!repo.has_pending_upload(2).await.unwrap());
}
