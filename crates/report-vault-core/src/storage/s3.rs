//! S3 storage backend using the AWS SDK.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLifecycleConfiguration, ExpirationStatus, LifecycleExpiration, LifecycleRuleFilter,
    ObjectCannedAcl, ServerSideEncryption,
};
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use super::{ObjectRecord, PutOptions, StorageBackend};
use crate::config::{CannedAcl, Encryption};
use crate::error::StorageError;
use crate::lifecycle::{LifecycleRule, RuleStatus};
use crate::{Error, Result};

/// S3 storage backend configuration
#[derive(Debug, Clone, Default)]
pub struct S3Settings {
    /// S3 bucket name
    pub bucket: String,
    /// AWS region
    pub region: Option<String>,
    /// Custom endpoint (for S3-compatible services like MinIO)
    pub endpoint: Option<String>,
    /// Access key ID; the AWS default credential chain applies when unset
    pub access_key: Option<String>,
    /// Secret access key
    pub secret_key: Option<String>,
    /// Use path-style requests (required for MinIO/Ceph RGW)
    pub force_path_style: bool,
}

/// S3 storage backend
pub struct S3Backend {
    client: Client,
    bucket: String,
}

impl S3Backend {
    /// Create a new S3 backend.
    ///
    /// Credentials not given explicitly resolve through the AWS default
    /// provider chain (environment variables, shared credentials file).
    pub async fn new(settings: S3Settings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = settings.region.clone() {
            loader = loader.region(Region::new(region));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint_url(endpoint);
        }
        if settings.force_path_style {
            builder = builder.force_path_style(true);
        }
        if let (Some(access_key), Some(secret_key)) = (&settings.access_key, &settings.secret_key)
        {
            builder = builder.credentials_provider(Credentials::new(
                access_key,
                secret_key,
                None,
                None,
                "report-vault",
            ));
        }

        info!("Created S3 backend for bucket: {}", settings.bucket);

        Self {
            client: Client::from_conf(builder.build()),
            bucket: settings.bucket,
        }
    }
}

fn rule_from_s3(rule: &aws_sdk_s3::types::LifecycleRule) -> LifecycleRule {
    let status = if matches!(rule.status(), ExpirationStatus::Enabled) {
        RuleStatus::Enabled
    } else {
        RuleStatus::Disabled
    };

    LifecycleRule {
        id: rule.id().unwrap_or_default().to_string(),
        prefix: rule
            .filter()
            .and_then(|filter| filter.prefix())
            .unwrap_or_default()
            .to_string(),
        status,
        expiration_days: rule
            .expiration()
            .and_then(|expiration| expiration.days())
            .unwrap_or_default(),
    }
}

fn rule_to_s3(rule: &LifecycleRule) -> Result<aws_sdk_s3::types::LifecycleRule> {
    let status = match rule.status {
        RuleStatus::Enabled => ExpirationStatus::Enabled,
        RuleStatus::Disabled => ExpirationStatus::Disabled,
    };

    aws_sdk_s3::types::LifecycleRule::builder()
        .id(&rule.id)
        .filter(LifecycleRuleFilter::builder().prefix(&rule.prefix).build())
        .status(status)
        .expiration(LifecycleExpiration::builder().days(rule.expiration_days).build())
        .build()
        .map_err(|err| {
            Error::Storage(StorageError::Backend(format!(
                "Invalid lifecycle rule {}: {}",
                rule.id, err
            )))
        })
}

#[async_trait]
impl StorageBackend for S3Backend {
    async fn put_object(&self, key: &str, source: &Path, options: &PutOptions) -> Result<()> {
        debug!("S3 PUT: {}", key);

        let body = ByteStream::from_path(source).await.map_err(|err| {
            Error::Storage(StorageError::Backend(format!(
                "Failed to open {}: {}",
                source.display(),
                err
            )))
        })?;

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(&options.content_type)
            .acl(match options.acl {
                CannedAcl::Private => ObjectCannedAcl::Private,
                CannedAcl::PublicRead => ObjectCannedAcl::PublicRead,
            });

        if options.encryption == Encryption::Aes256 {
            request = request.server_side_encryption(ServerSideEncryption::Aes256);
        }

        for (name, value) in &options.metadata {
            request = request.metadata(name, value);
        }

        request
            .send()
            .await
            .map_err(|err| Error::Storage(StorageError::Backend(format!("S3 PUT failed: {}", err))))?;

        Ok(())
    }

    async fn list_objects(&self) -> Result<Vec<ObjectRecord>> {
        debug!("S3 LIST: {}", self.bucket);

        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = self.client.list_objects_v2().bucket(&self.bucket);
            if let Some(token) = continuation_token.take() {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(|err| {
                Error::Storage(StorageError::Backend(format!("S3 LIST failed: {}", err)))
            })?;

            keys.extend(
                response
                    .contents()
                    .iter()
                    .filter_map(|object| object.key().map(|key| key.to_string())),
            );

            if !response.is_truncated().unwrap_or(false) {
                break;
            }
            continuation_token = response.next_continuation_token().map(|token| token.to_string());
        }

        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            let head = self
                .client
                .head_object()
                .bucket(&self.bucket)
                .key(&key)
                .send()
                .await
                .map_err(|err| {
                    Error::Storage(StorageError::Backend(format!(
                        "S3 HEAD failed for {}: {}",
                        key, err
                    )))
                })?;

            let metadata: BTreeMap<String, String> = head
                .metadata()
                .map(|metadata| {
                    metadata
                        .iter()
                        .map(|(name, value)| (name.clone(), value.clone()))
                        .collect()
                })
                .unwrap_or_default();

            let last_modified = head
                .last_modified()
                .and_then(|dt| DateTime::<Utc>::from_timestamp(dt.secs(), dt.subsec_nanos()));

            records.push(ObjectRecord {
                key,
                metadata,
                last_modified,
                expiration: head.expiration().map(|annotation| annotation.to_string()),
            });
        }

        Ok(records)
    }

    async fn lifecycle_rules(&self) -> Result<Vec<LifecycleRule>> {
        debug!("S3 GET lifecycle: {}", self.bucket);

        // Only the rule list crosses this boundary; the rest of the response
        // envelope is protocol detail.
        match self
            .client
            .get_bucket_lifecycle_configuration()
            .bucket(&self.bucket)
            .send()
            .await
        {
            Ok(output) => Ok(output.rules().iter().map(rule_from_s3).collect()),
            Err(err) if err.code() == Some("NoSuchLifecycleConfiguration") => {
                Err(Error::Storage(StorageError::NoLifecycleConfiguration))
            }
            Err(err) => Err(Error::Storage(StorageError::Backend(format!(
                "S3 GET lifecycle failed: {}",
                err
            )))),
        }
    }

    async fn put_lifecycle_rules(&self, rules: &[LifecycleRule]) -> Result<()> {
        debug!("S3 PUT lifecycle: {} ({} rules)", self.bucket, rules.len());

        let s3_rules = rules.iter().map(rule_to_s3).collect::<Result<Vec<_>>>()?;
        let configuration = BucketLifecycleConfiguration::builder()
            .set_rules(Some(s3_rules))
            .build()
            .map_err(|err| {
                Error::Storage(StorageError::Backend(format!(
                    "Invalid lifecycle configuration: {}",
                    err
                )))
            })?;

        self.client
            .put_bucket_lifecycle_configuration()
            .bucket(&self.bucket)
            .lifecycle_configuration(configuration)
            .send()
            .await
            .map_err(|err| {
                Error::Storage(StorageError::Backend(format!(
                    "S3 PUT lifecycle failed: {}",
                    err
                )))
            })?;

        Ok(())
    }

    async fn clear_lifecycle_rules(&self) -> Result<()> {
        debug!("S3 DELETE lifecycle: {}", self.bucket);

        self.client
            .delete_bucket_lifecycle()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|err| {
                Error::Storage(StorageError::Backend(format!(
                    "S3 DELETE lifecycle failed: {}",
                    err
                )))
            })?;

        Ok(())
    }
}
