//! In-memory storage backend for testing.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::{ObjectRecord, PutOptions, StorageBackend};
use crate::config::{CannedAcl, Encryption};
use crate::error::StorageError;
use crate::lifecycle::{LifecycleRule, RuleStatus};
use crate::{Error, Result};

struct StoredObject {
    data: Vec<u8>,
    metadata: BTreeMap<String, String>,
    content_type: String,
    acl: CannedAcl,
    encryption: Encryption,
    last_modified: DateTime<Utc>,
}

/// Fixed attributes stored with an object, exposed for test assertions.
#[derive(Debug, Clone)]
pub struct StoredAttributes {
    pub content_type: String,
    pub acl: CannedAcl,
    pub encryption: Encryption,
}

/// In-memory storage backend.
///
/// Holds objects and the bucket's lifecycle configuration in process memory
/// so merge and upload behavior can be tested deterministically without a
/// remote service. A lifecycle state of `None` means the bucket was never
/// configured, matching the remote "no configuration" condition.
pub struct MemoryBackend {
    objects: RwLock<BTreeMap<String, StoredObject>>,
    lifecycle: RwLock<Option<Vec<LifecycleRule>>>,
    fail_lifecycle_writes: AtomicBool,
}

impl MemoryBackend {
    /// Create a new in-memory storage backend
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
            lifecycle: RwLock::new(None),
            fail_lifecycle_writes: AtomicBool::new(false),
        }
    }

    /// Make subsequent lifecycle writes (put and clear) fail, to exercise
    /// the non-fatal write-back path.
    pub fn fail_lifecycle_writes(&self, fail: bool) {
        self.fail_lifecycle_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw bytes stored for a key
    pub async fn object_data(&self, key: &str) -> Option<Vec<u8>> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|object| object.data.clone())
    }

    /// Fixed attributes stored for a key
    pub async fn object_attributes(&self, key: &str) -> Option<StoredAttributes> {
        self.objects.read().await.get(key).map(|object| StoredAttributes {
            content_type: object.content_type.clone(),
            acl: object.acl,
            encryption: object.encryption,
        })
    }

    fn lifecycle_write_error(&self) -> Option<Error> {
        if self.fail_lifecycle_writes.load(Ordering::SeqCst) {
            Some(Error::Storage(StorageError::Backend(
                "Injected lifecycle write failure".to_string(),
            )))
        } else {
            None
        }
    }

    /// Expiration annotation for a key, in the storage service's header
    /// format: expiry date plus the id of the rule that produced it.
    fn expiration_for(
        key: &str,
        uploaded: DateTime<Utc>,
        rules: &Option<Vec<LifecycleRule>>,
    ) -> Option<String> {
        let rules = rules.as_ref()?;
        let rule = rules
            .iter()
            .find(|rule| rule.status == RuleStatus::Enabled && key.starts_with(&rule.prefix))?;
        let expires = uploaded + Duration::days(i64::from(rule.expiration_days));

        Some(format!(
            "expiry-date=\"{}\", rule-id=\"{}\"",
            expires.to_rfc2822(),
            rule.id
        ))
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn put_object(&self, key: &str, source: &Path, options: &PutOptions) -> Result<()> {
        let data = tokio::fs::read(source).await?;

        let mut objects = self.objects.write().await;
        objects.insert(
            key.to_string(),
            StoredObject {
                data,
                metadata: options.metadata.clone(),
                content_type: options.content_type.clone(),
                acl: options.acl,
                encryption: options.encryption,
                last_modified: Utc::now(),
            },
        );

        Ok(())
    }

    async fn list_objects(&self) -> Result<Vec<ObjectRecord>> {
        let objects = self.objects.read().await;
        let lifecycle = self.lifecycle.read().await;

        Ok(objects
            .iter()
            .map(|(key, object)| ObjectRecord {
                key: key.clone(),
                metadata: object.metadata.clone(),
                last_modified: Some(object.last_modified),
                expiration: Self::expiration_for(key, object.last_modified, &lifecycle),
            })
            .collect())
    }

    async fn lifecycle_rules(&self) -> Result<Vec<LifecycleRule>> {
        match self.lifecycle.read().await.as_ref() {
            Some(rules) => Ok(rules.clone()),
            None => Err(Error::Storage(StorageError::NoLifecycleConfiguration)),
        }
    }

    async fn put_lifecycle_rules(&self, rules: &[LifecycleRule]) -> Result<()> {
        if let Some(err) = self.lifecycle_write_error() {
            return Err(err);
        }
        *self.lifecycle.write().await = Some(rules.to_vec());
        Ok(())
    }

    async fn clear_lifecycle_rules(&self) -> Result<()> {
        if let Some(err) = self.lifecycle_write_error() {
            return Err(err);
        }
        *self.lifecycle.write().await = None;
        Ok(())
    }
}
