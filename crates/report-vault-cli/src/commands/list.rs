use anyhow::Result;
use report_vault_core::storage::create_backend;
use report_vault_core::{ObjectRecord, StorageSettings};
use tracing::info;

pub async fn run(settings: &StorageSettings) -> Result<()> {
    let backend = create_backend(settings).await?;

    let records = backend.list_objects().await?;
    info!("Listing {} objects", records.len());

    for record in records {
        println!("{}", format_record(&record));
    }

    Ok(())
}

/// One comma-joined line per object: key, metadata, last-modified,
/// expiration annotation.
fn format_record(record: &ObjectRecord) -> String {
    let metadata: Vec<String> = record
        .metadata
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect();

    let last_modified = record
        .last_modified
        .map(|timestamp| timestamp.to_rfc3339())
        .unwrap_or_else(|| "-".to_string());

    let expiration = record.expiration.clone().unwrap_or_else(|| "-".to_string());

    [
        record.key.clone(),
        format!("{{{}}}", metadata.join("; ")),
        last_modified,
        expiration,
    ]
    .join(",")
}
