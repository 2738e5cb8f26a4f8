//! Lifecycle rule construction and the upsert-by-id merge.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::{Error, Result, StorageError};
use crate::storage::StorageBackend;

/// Whether a lifecycle rule is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Enabled,
    Disabled,
}

/// A bucket-level expiration rule scoped to a key prefix.
///
/// Identity is the id (the content digest of the upload the rule covers),
/// not the rule's position in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleRule {
    /// Rule identifier
    pub id: String,

    /// Key prefix the rule applies to
    pub prefix: String,

    /// Whether the rule is in effect
    pub status: RuleStatus,

    /// Days after creation before covered objects are deleted
    pub expiration_days: i32,
}

/// Build the expiration rule for an uploaded key. The rule id is the key's
/// first path segment, i.e. the content digest.
pub fn rule_for_key(key: &str, retention_days: i32) -> LifecycleRule {
    let id = key.split_once('/').map(|(digest, _)| digest).unwrap_or(key);

    LifecycleRule {
        id: id.to_string(),
        prefix: key.to_string(),
        status: RuleStatus::Enabled,
        expiration_days: retention_days,
    }
}

/// Upsert the expiration rule for `key` into the bucket's lifecycle
/// configuration.
///
/// Fetches the current rule set (a bucket with no configuration counts as an
/// empty set), drops any rule carrying the same id, and writes the modified
/// set back in one call. When a prior rule existed the remote configuration
/// is cleared first; the storage API replaces whole configurations, there is
/// no per-rule delete. A failed clear or write-back is reported but not
/// returned: the object upload has already succeeded and stands on its own,
/// while any other fetch failure aborts the caller.
pub async fn apply_retention(
    backend: &dyn StorageBackend,
    key: &str,
    retention_days: i32,
) -> Result<Vec<LifecycleRule>> {
    let rule_id = key.split_once('/').map(|(digest, _)| digest).unwrap_or(key);

    let mut rules = match backend.lifecycle_rules().await {
        Ok(rules) => rules,
        Err(Error::Storage(StorageError::NoLifecycleConfiguration)) => Vec::new(),
        Err(err) => return Err(err),
    };

    if let Some(position) = rules.iter().rposition(|rule| rule.id == rule_id) {
        debug!("Replacing existing lifecycle rule: {}", rule_id);
        rules.remove(position);
        if let Err(err) = backend.clear_lifecycle_rules().await {
            warn!("Clearing lifecycle configuration failed: {}", err);
        }
    }

    rules.push(rule_for_key(key, retention_days));

    if let Err(err) = backend.put_lifecycle_rules(&rules).await {
        error!(
            "Writing lifecycle configuration for {} failed: {}",
            rule_id, err
        );
    }

    Ok(rules)
}
