//! Retention merge unit tests.
//!
//! Cover the upsert-by-id semantics: replace, append on empty, idempotence,
//! and the non-fatal write-back path.

use report_vault_core::{
    apply_retention, Error, MemoryBackend, RuleStatus, StorageBackend, StorageError,
};

use super::helpers::existing_rule;

#[tokio::test]
async fn merge_replaces_rule_with_matching_id() {
    let backend = MemoryBackend::new();
    backend
        .put_lifecycle_rules(&[
            existing_rule("abc123", "abc123/stale.zip", 7),
            existing_rule("other", "other/report.zip", 3),
        ])
        .await
        .unwrap();

    apply_retention(&backend, "abc123/report.zip", 3)
        .await
        .unwrap();

    let rules = backend.lifecycle_rules().await.unwrap();
    let matching: Vec<_> = rules.iter().filter(|rule| rule.id == "abc123").collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].prefix, "abc123/report.zip");
    assert_eq!(matching[0].expiration_days, 3);
    assert_eq!(matching[0].status, RuleStatus::Enabled);

    // The unrelated rule survives the rewrite.
    assert!(rules.iter().any(|rule| rule.id == "other"));
    assert_eq!(rules.len(), 2);
}

#[tokio::test]
async fn merge_with_no_configuration_creates_single_rule() {
    let backend = MemoryBackend::new();

    let merged = apply_retention(&backend, "abc123/report.zip", 3)
        .await
        .unwrap();
    assert_eq!(merged.len(), 1);

    let rules = backend.lifecycle_rules().await.unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].id, "abc123");
    assert_eq!(rules[0].prefix, "abc123/report.zip");
    assert_eq!(rules[0].expiration_days, 3);
}

#[tokio::test]
async fn merge_twice_for_same_digest_is_idempotent() {
    let backend = MemoryBackend::new();

    apply_retention(&backend, "abc123/report.zip", 3)
        .await
        .unwrap();
    apply_retention(&backend, "abc123/report.zip", 3)
        .await
        .unwrap();

    let rules = backend.lifecycle_rules().await.unwrap();
    assert_eq!(
        rules.iter().filter(|rule| rule.id == "abc123").count(),
        1
    );
    assert_eq!(rules.len(), 1);
}

#[tokio::test]
async fn merge_keeps_rules_for_other_digests() {
    let backend = MemoryBackend::new();

    apply_retention(&backend, "first/report.zip", 3).await.unwrap();
    apply_retention(&backend, "second/report.zip", 3).await.unwrap();

    let rules = backend.lifecycle_rules().await.unwrap();
    assert_eq!(rules.len(), 2);
    assert!(rules.iter().any(|rule| rule.id == "first"));
    assert!(rules.iter().any(|rule| rule.id == "second"));
}

#[tokio::test]
async fn write_back_failure_is_not_fatal() {
    let backend = MemoryBackend::new();
    backend.fail_lifecycle_writes(true);

    // The merge still reports the set it attempted to persist.
    let merged = apply_retention(&backend, "abc123/report.zip", 3)
        .await
        .unwrap();
    assert_eq!(merged.len(), 1);

    // Nothing was persisted.
    let err = backend.lifecycle_rules().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Storage(StorageError::NoLifecycleConfiguration)
    ));
}
