//! Storage backend trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::{CannedAcl, Encryption};
use crate::lifecycle::LifecycleRule;
use crate::Result;

/// Attributes applied to an object write.
#[derive(Debug, Clone)]
pub struct PutOptions {
    /// Content type of the stored object
    pub content_type: String,

    /// Canned access control
    pub acl: CannedAcl,

    /// Server-side encryption
    pub encryption: Encryption,

    /// User metadata stored with the object
    pub metadata: BTreeMap<String, String>,
}

/// One bucket entry as reported by a listing.
#[derive(Debug, Clone)]
pub struct ObjectRecord {
    /// Object key
    pub key: String,

    /// User metadata stored with the object
    pub metadata: BTreeMap<String, String>,

    /// Last modified timestamp
    pub last_modified: Option<DateTime<Utc>>,

    /// Expiry date plus the id of the rule that produced it, when a
    /// lifecycle rule covers the object
    pub expiration: Option<String>,
}

/// Trait for storage backends
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Write a local file to a key with the given attributes
    async fn put_object(&self, key: &str, source: &Path, options: &PutOptions) -> Result<()>;

    /// Enumerate every object currently in the bucket
    async fn list_objects(&self) -> Result<Vec<ObjectRecord>>;

    /// Fetch the bucket's lifecycle rules.
    ///
    /// Returns `StorageError::NoLifecycleConfiguration` when the bucket has
    /// never been configured, so callers can tell "nothing there yet" apart
    /// from a failed fetch.
    async fn lifecycle_rules(&self) -> Result<Vec<LifecycleRule>>;

    /// Replace the bucket's lifecycle configuration with the given rules
    async fn put_lifecycle_rules(&self, rules: &[LifecycleRule]) -> Result<()>;

    /// Remove the bucket's lifecycle configuration entirely
    async fn clear_lifecycle_rules(&self) -> Result<()>;
}
