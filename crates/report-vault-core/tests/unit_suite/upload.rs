//! Upload path unit tests.
//!
//! End-to-end against the in-memory backend: validation gating, the
//! content-addressed key, stored metadata and attributes, and the
//! upload-then-retention flow.

use report_vault_core::{
    apply_retention, CannedAcl, Encryption, Error, MemoryBackend, ReportUploader, RuleStatus,
    StorageBackend, UploadPolicy,
};
use std::sync::Arc;

use super::helpers::{reference_sha256, write_test_zip};

#[tokio::test]
async fn upload_writes_object_under_digest_key() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_test_zip(dir.path(), "demo.zip", b"known demo bytes");
    let digest = reference_sha256(&path);

    let backend = Arc::new(MemoryBackend::new());
    let uploader = ReportUploader::new(backend.clone(), UploadPolicy::default());

    let receipt = uploader.upload(&path, "Acme").await.unwrap();
    assert_eq!(receipt.digest, digest);
    assert_eq!(receipt.key, format!("{}/report.zip", digest));
    assert_eq!(receipt.customer, "Acme");
    assert_eq!(receipt.original_file, "demo.zip");

    let records = backend.list_objects().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key, receipt.key);
    assert_eq!(records[0].metadata.get("customer").unwrap(), "Acme");
    assert_eq!(records[0].metadata.get("originalFile").unwrap(), "demo.zip");

    let attributes = backend.object_attributes(&receipt.key).await.unwrap();
    assert_eq!(attributes.content_type, "application/zip");
    assert_eq!(attributes.acl, CannedAcl::PublicRead);
    assert_eq!(attributes.encryption, Encryption::Aes256);

    // The stored body is the archive byte-for-byte.
    assert_eq!(
        backend.object_data(&receipt.key).await.unwrap(),
        std::fs::read(&path).unwrap()
    );
}

#[tokio::test]
async fn upload_then_retention_end_to_end() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_test_zip(dir.path(), "demo.zip", b"known demo bytes");

    let backend = Arc::new(MemoryBackend::new());
    let policy = UploadPolicy::default();
    let uploader = ReportUploader::new(backend.clone(), policy.clone());

    let receipt = uploader.upload(&path, "Acme").await.unwrap();
    apply_retention(backend.as_ref(), &receipt.key, policy.retention_days)
        .await
        .unwrap();

    let rules = backend.lifecycle_rules().await.unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].id, receipt.digest);
    assert_eq!(rules[0].prefix, receipt.key);
    assert_eq!(rules[0].status, RuleStatus::Enabled);
    assert_eq!(rules[0].expiration_days, 3);

    // The listing reports the expiration with the originating rule id.
    let records = backend.list_objects().await.unwrap();
    let annotation = records[0].expiration.as_ref().unwrap();
    assert!(annotation.contains(&format!("rule-id=\"{}\"", receipt.digest)));
}

#[tokio::test]
async fn invalid_archive_fails_before_any_write() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("broken.zip");
    std::fs::write(&path, b"not a zip container").unwrap();

    let backend = Arc::new(MemoryBackend::new());
    let uploader = ReportUploader::new(backend.clone(), UploadPolicy::default());

    let err = uploader.upload(&path, "Acme").await.unwrap_err();
    assert!(matches!(err, Error::Archive(_)));

    assert!(backend.list_objects().await.unwrap().is_empty());
}

#[tokio::test]
async fn retention_write_failure_leaves_upload_intact() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_test_zip(dir.path(), "demo.zip", b"known demo bytes");

    let backend = Arc::new(MemoryBackend::new());
    let policy = UploadPolicy::default();
    let uploader = ReportUploader::new(backend.clone(), policy.clone());

    let receipt = uploader.upload(&path, "Acme").await.unwrap();

    backend.fail_lifecycle_writes(true);
    apply_retention(backend.as_ref(), &receipt.key, policy.retention_days)
        .await
        .unwrap();

    // The object upload is the deliverable; it must survive the failed
    // lifecycle write.
    let records = backend.list_objects().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key, receipt.key);
}

#[tokio::test]
async fn record_line_is_comma_joined() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_test_zip(dir.path(), "demo.zip", b"known demo bytes");
    let digest = reference_sha256(&path);

    let backend = Arc::new(MemoryBackend::new());
    let uploader = ReportUploader::new(backend, UploadPolicy::default());

    let receipt = uploader.upload(&path, "Acme").await.unwrap();
    let line = receipt.record_line();

    let fields: Vec<&str> = line.split(',').collect();
    assert_eq!(fields.len(), 4);
    assert_eq!(fields[1], "Acme");
    assert_eq!(fields[2], "demo.zip");
    assert_eq!(fields[3], digest);
}
