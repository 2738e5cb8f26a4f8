use anyhow::Result;
use report_vault_core::storage::create_backend;
use report_vault_core::{apply_retention, ReportUploader, StorageSettings, UploadPolicy};
use std::path::Path;
use tracing::info;

pub async fn run(file: &str, customer: &str, settings: &StorageSettings) -> Result<()> {
    let policy = UploadPolicy::default();
    let backend = create_backend(settings).await?;

    let uploader = ReportUploader::new(backend.clone(), policy.clone());
    let receipt = uploader.upload(Path::new(file), customer).await?;

    info!(
        "Upload successful, applying {}-day retention to {}",
        policy.retention_days, receipt.key
    );
    apply_retention(backend.as_ref(), &receipt.key, policy.retention_days).await?;

    println!("{}", receipt.record_line());

    Ok(())
}
