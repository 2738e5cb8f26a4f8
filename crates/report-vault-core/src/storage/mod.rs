//! Storage backend abstraction and implementations.
//!
//! This module provides a unified interface for the bucket operations the
//! upload and listing paths need:
//!
//! - **S3**: AWS S3 and S3-compatible services (MinIO, Ceph RGW, etc.)
//! - **Memory**: In-memory storage (for testing)

mod backend;
mod config;
mod memory;
mod s3;

pub use backend::{ObjectRecord, PutOptions, StorageBackend};
pub use config::StorageSettings;
pub use memory::{MemoryBackend, StoredAttributes};
pub use s3::{S3Backend, S3Settings};

use crate::Result;
use std::sync::Arc;

/// Create a storage backend from configuration.
pub async fn create_backend(settings: &StorageSettings) -> Result<Arc<dyn StorageBackend>> {
    match settings {
        StorageSettings::S3 {
            bucket,
            region,
            endpoint,
            access_key,
            secret_key,
            force_path_style,
        } => {
            let s3_settings = S3Settings {
                bucket: bucket.clone(),
                region: region.clone(),
                endpoint: endpoint.clone(),
                access_key: access_key.clone(),
                secret_key: secret_key.clone(),
                force_path_style: *force_path_style,
            };
            Ok(Arc::new(S3Backend::new(s3_settings).await))
        }

        StorageSettings::Memory => Ok(Arc::new(MemoryBackend::new())),
    }
}
