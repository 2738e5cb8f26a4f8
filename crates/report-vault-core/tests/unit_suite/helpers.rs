//! Test helper utilities.
//!
//! Provides common test data generation used across unit tests.

use report_vault_core::{LifecycleRule, RuleStatus};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write a stored (uncompressed) zip archive containing one entry.
pub fn write_test_zip(dir: &Path, name: &str, payload: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    writer.start_file("report.txt", options).unwrap();
    writer.write_all(payload).unwrap();
    writer.finish().unwrap();
    path
}

/// Reference digest computed in one shot over the file's contents.
pub fn reference_sha256(path: &Path) -> String {
    let contents = std::fs::read(path).unwrap();
    hex::encode(Sha256::digest(&contents))
}

/// A lifecycle rule as an earlier run would have left it.
pub fn existing_rule(id: &str, prefix: &str, days: i32) -> LifecycleRule {
    LifecycleRule {
        id: id.to_string(),
        prefix: prefix.to_string(),
        status: RuleStatus::Enabled,
        expiration_days: days,
    }
}
