//! Validated, content-addressed report uploads.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::archive;
use crate::config::UploadPolicy;
use crate::digest;
use crate::error::{Error, Result};
use crate::storage::{PutOptions, StorageBackend};

/// Outcome of a successful upload, used for the record line and the
/// subsequent retention merge.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    /// Key the object was written at (`<digest>/<report name>`)
    pub key: String,

    /// Content digest of the uploaded archive
    pub digest: String,

    /// Customer label the upload was associated with
    pub customer: String,

    /// File name of the local archive
    pub original_file: String,

    /// When the upload completed
    pub uploaded_at: DateTime<Utc>,
}

impl UploadReceipt {
    /// Comma-joined `timestamp,customer,original filename,digest` record.
    pub fn record_line(&self) -> String {
        [
            self.uploaded_at.to_rfc3339(),
            self.customer.clone(),
            self.original_file.clone(),
            self.digest.clone(),
        ]
        .join(",")
    }
}

/// Uploads zip archives under their content digest.
pub struct ReportUploader {
    backend: Arc<dyn StorageBackend>,
    policy: UploadPolicy,
}

impl ReportUploader {
    pub fn new(backend: Arc<dyn StorageBackend>, policy: UploadPolicy) -> Self {
        Self { backend, policy }
    }

    /// Validate the archive, hash it, and write it to the bucket as
    /// `<digest>/<report name>` with the policy's fixed attributes and the
    /// `{customer, originalFile}` metadata pair.
    ///
    /// Validation runs before hashing and hashing before any network call,
    /// so a broken input never reaches the bucket. Any backend error is
    /// fatal to the upload.
    pub async fn upload(&self, archive_path: &Path, customer: &str) -> Result<UploadReceipt> {
        archive::validate_zip(archive_path)?;

        let digest = digest::file_sha256(archive_path)?;
        let original_file = archive_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::Config(format!("{} has no file name", archive_path.display()))
            })?;

        let key = format!("{}/{}", digest, self.policy.report_name);

        let mut metadata = BTreeMap::new();
        metadata.insert("customer".to_string(), customer.to_string());
        metadata.insert("originalFile".to_string(), original_file.clone());

        let options = PutOptions {
            content_type: self.policy.content_type.clone(),
            acl: self.policy.acl,
            encryption: self.policy.encryption,
            metadata,
        };

        self.backend.put_object(&key, archive_path, &options).await?;
        info!("Uploaded {} to {}", original_file, key);

        Ok(UploadReceipt {
            key,
            digest,
            customer: customer.to_string(),
            original_file,
            uploaded_at: Utc::now(),
        })
    }
}
