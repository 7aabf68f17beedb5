#![allow(missing_docs)]

use std::path::PathBuf;

use stashfield::{
    DiskTempStorage, DisplayedFile, SubmissionInput, TempStorage, Token, UploadField,
    UploadHandle, UploadedFile,
};
use uuid::Uuid;

#[tokio::test]
async fn temp_dir_creates_one_directory_per_token() {
    let root = temp_root();
    let storage = DiskTempStorage::builder()
        .destination(&root)
        .build()
        .expect("builder should succeed");

    let token = Token::parse("123456").expect("token should parse");
    let dir = storage.temp_dir(&token).await.expect("temp_dir should succeed");
    assert_eq!(dir, root.join("123456"));
    assert!(tokio::fs::metadata(&dir).await.expect("dir should exist").is_dir());

    let again = storage.temp_dir(&token).await.expect("temp_dir should succeed");
    assert_eq!(dir, again);

    cleanup(root).await;
}

#[tokio::test]
async fn purge_removes_staged_files_and_is_idempotent() {
    let root = temp_root();
    let storage = DiskTempStorage::builder()
        .path(&root)
        .build()
        .expect("builder should succeed");

    let token = Token::generate();
    let dir = storage.temp_dir(&token).await.expect("temp_dir should succeed");
    tokio::fs::write(dir.join("staged.txt"), b"hello")
        .await
        .expect("write staged file");

    storage.purge(&token).await.expect("purge should succeed");
    assert!(!tokio::fs::try_exists(&dir).await.expect("try_exists should succeed"));
    storage.purge(&token).await.expect("second purge should succeed");

    cleanup(root).await;
}

#[test]
fn builder_rejects_empty_root() {
    let err = DiskTempStorage::builder()
        .destination("")
        .build()
        .expect_err("empty root should be rejected");
    assert!(err.to_string().contains("cannot be empty"));
}

#[test]
fn default_root_lives_under_system_temp_dir() {
    let storage = DiskTempStorage::builder()
        .build()
        .expect("builder should succeed");
    assert!(storage.root().starts_with(std::env::temp_dir()));
}

#[tokio::test]
async fn uploaded_file_survives_a_failed_submission() {
    let root = temp_root();
    let spool_dir = root.join("spool");
    let storage = DiskTempStorage::builder()
        .destination(root.join("staged"))
        .build()
        .expect("builder should succeed");

    let upload = UploadedFile::spool(&spool_dir, "original_name.jpg", &b"jpeg-bytes"[..])
        .await
        .expect("spool should succeed");
    let spooled = upload.source_path().to_path_buf();

    let mut first = UploadField::new("file", storage.clone());
    first
        .submit(SubmissionInput::upload(upload))
        .await
        .expect("first submit should succeed");

    let displayed = first.displayed_data().clone();
    let staged = first.data().expect("data should be set").to_path_buf();
    assert!(matches!(displayed.file, DisplayedFile::Uploaded(_)));
    assert_eq!(displayed.name, "original_name.jpg");
    assert_eq!(
        staged,
        storage.root().join(&displayed.token).join("original_name.jpg")
    );
    assert!(!tokio::fs::try_exists(&spooled).await.expect("try_exists should succeed"));
    assert_eq!(tokio::fs::read(&staged).await.expect("read staged"), b"jpeg-bytes");

    // a sibling field failed validation: the form re-renders and is submitted
    // again with only the hidden token and name
    let mut second = UploadField::new("file", storage.clone());
    second
        .submit(SubmissionInput::<UploadedFile>::token(
            displayed.token.clone(),
            displayed.name.clone(),
        ))
        .await
        .expect("second submit should succeed");

    assert_eq!(second.data(), Some(staged.as_path()));
    assert_eq!(
        second.displayed_data().file.file().map(|file| file.path()),
        Some(staged.as_path())
    );
    assert!(matches!(second.displayed_data().file, DisplayedFile::Stored(_)));

    let token = Token::parse(&displayed.token).expect("token should parse");
    storage.purge(&token).await.expect("purge should succeed");
    assert!(!tokio::fs::try_exists(&staged).await.expect("try_exists should succeed"));

    cleanup(root).await;
}

#[tokio::test]
async fn unicode_name_with_space_round_trips() {
    let root = temp_root();
    let storage = DiskTempStorage::builder()
        .destination(root.join("staged"))
        .build()
        .expect("builder should succeed");

    let upload = UploadedFile::spool(root.join("spool"), "résumé final.pdf", "pdf-bytes")
        .await
        .expect("spool should succeed");

    let mut first = UploadField::new("file", storage.clone());
    first
        .submit(SubmissionInput::upload(upload))
        .await
        .expect("first submit should succeed");

    let displayed = first.displayed_data().clone();
    let staged = storage
        .root()
        .join(&displayed.token)
        .join("résumé final.pdf");
    assert_eq!(first.data(), Some(staged.as_path()));
    assert_eq!(displayed.name, "résumé final.pdf");
    assert_eq!(tokio::fs::read(&staged).await.expect("read staged"), b"pdf-bytes");

    let mut second = UploadField::new("file", storage.clone());
    second
        .submit(SubmissionInput::<UploadedFile>::token(
            displayed.token.clone(),
            displayed.name.clone(),
        ))
        .await
        .expect("second submit should succeed");

    assert_eq!(second.data(), Some(staged.as_path()));
    assert!(matches!(second.displayed_data().file, DisplayedFile::Stored(_)));

    cleanup(root).await;
}

#[tokio::test]
async fn traversal_in_original_name_stays_inside_token_dir() {
    let root = temp_root();
    let storage = DiskTempStorage::builder()
        .destination(root.join("staged"))
        .build()
        .expect("builder should succeed");
    let upload = UploadedFile::spool(root.join("spool"), "..\\..\\bad name.txt", "hello")
        .await
        .expect("spool should succeed");
    assert_eq!(upload.original_name(), "..\\..\\bad name.txt");

    let mut field = UploadField::new("file", storage.clone());
    field
        .submit(SubmissionInput::upload(upload))
        .await
        .expect("submit should succeed");

    let token_dir = storage.root().join(&field.displayed_data().token);
    let moved = field.data().expect("data should be set");
    assert_eq!(moved, token_dir.join("bad name.txt"));
    assert_eq!(field.displayed_data().name, "bad name.txt");
    assert_eq!(tokio::fs::read(moved).await.expect("read moved"), b"hello");

    cleanup(root).await;
}

#[tokio::test]
async fn incomplete_upload_is_never_moved() {
    let root = temp_root();
    let storage = DiskTempStorage::builder()
        .destination(root.join("staged"))
        .build()
        .expect("builder should succeed");
    let upload = UploadedFile::spool(root.join("spool"), "partial.bin", "half")
        .await
        .expect("spool should succeed")
        .incomplete();
    let spooled = upload.source_path().to_path_buf();
    assert!(!upload.is_valid());

    let mut field = UploadField::new("file", storage);
    field
        .submit(SubmissionInput::upload(upload))
        .await
        .expect("submit should succeed");

    assert_eq!(field.data(), None);
    assert!(tokio::fs::try_exists(&spooled).await.expect("try_exists should succeed"));
    assert!(!tokio::fs::try_exists(root.join("staged"))
        .await
        .expect("try_exists should succeed"));

    cleanup(root).await;
}

#[test]
fn content_type_falls_back_to_octet_stream() {
    let upload = UploadedFile::new("/tmp/x", "x.png").with_content_type("image/png");
    assert_eq!(upload.content_type().essence_str(), "image/png");

    let upload = UploadedFile::new("/tmp/x", "x.png").with_content_type("not a mime");
    assert_eq!(upload.content_type(), &mime::APPLICATION_OCTET_STREAM);
}

fn temp_root() -> PathBuf {
    std::env::temp_dir().join(format!("stashfield-test-{}", Uuid::new_v4()))
}

async fn cleanup(path: PathBuf) {
    let _ = tokio::fs::remove_dir_all(path).await;
}
