//! Report Vault Core Library
//!
//! This crate provides the core functionality for uploading zip report
//! archives to an object-storage bucket under a content-addressed key and
//! keeping a per-upload expiration rule in the bucket's lifecycle
//! configuration.

pub mod archive;
pub mod config;
pub mod digest;
pub mod error;
pub mod lifecycle;
pub mod storage;
pub mod uploader;

pub use config::{CannedAcl, Encryption, UploadPolicy};
pub use error::{ArchiveError, Error, Result, StorageError};
pub use lifecycle::{apply_retention, LifecycleRule, RuleStatus};
pub use storage::{
    create_backend, MemoryBackend, ObjectRecord, PutOptions, S3Backend, S3Settings,
    StorageBackend, StorageSettings,
};
pub use uploader::{ReportUploader, UploadReceipt};
