//! Storage configuration types.

use serde::{Deserialize, Serialize};

/// Storage backend configuration using tagged enum for type-safe
/// configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend")]
pub enum StorageSettings {
    /// AWS S3 or S3-compatible storage (MinIO, Ceph RGW, etc.)
    #[serde(rename = "s3")]
    S3 {
        /// S3 bucket name
        bucket: String,

        /// AWS region (e.g., "us-east-1")
        #[serde(default)]
        region: Option<String>,

        /// Custom endpoint URL (for S3-compatible services like MinIO)
        #[serde(default)]
        endpoint: Option<String>,

        /// Access key ID; the AWS default credential chain applies when unset
        #[serde(default)]
        access_key: Option<String>,

        /// Secret access key; the AWS default credential chain applies when unset
        #[serde(default)]
        secret_key: Option<String>,

        /// Use path-style requests (required for MinIO/Ceph RGW)
        #[serde(default)]
        force_path_style: bool,
    },

    /// In-memory storage (for testing)
    #[serde(rename = "memory")]
    Memory,
}
