//! Upload policy configuration.

use serde::{Deserialize, Serialize};

/// Canned access control applied to uploaded objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CannedAcl {
    Private,
    PublicRead,
}

/// Server-side encryption applied to uploaded objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encryption {
    None,
    Aes256,
}

/// Fixed attributes of a report upload, passed to the uploader and the
/// retention merge at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadPolicy {
    /// Object file name stored under the digest prefix
    pub report_name: String,

    /// Content type set on the uploaded object
    pub content_type: String,

    /// Access control applied to the uploaded object
    pub acl: CannedAcl,

    /// Server-side encryption applied to the uploaded object
    pub encryption: Encryption,

    /// Days before uploaded objects expire
    pub retention_days: i32,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            report_name: "report.zip".to_string(),
            content_type: "application/zip".to_string(),
            acl: CannedAcl::PublicRead,
            encryption: Encryption::Aes256,
            retention_days: 3,
        }
    }
}
