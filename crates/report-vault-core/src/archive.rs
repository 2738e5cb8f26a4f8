//! Zip archive validation.

use std::fs::File;
use std::io;
use std::path::Path;
use zip::ZipArchive;

use crate::error::ArchiveError;

/// Check that `path` is a readable, well-formed zip archive.
///
/// Opens the central directory and reads every entry to the end so stored
/// CRCs are verified. Runs before hashing, so a broken file fails with an
/// actionable message instead of surfacing later in the upload.
pub fn validate_zip(path: &Path) -> Result<(), ArchiveError> {
    let file = File::open(path).map_err(|source| ArchiveError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;

    let mut archive = ZipArchive::new(file).map_err(|err| ArchiveError::Malformed {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|err| ArchiveError::Malformed {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let name = entry.name().to_string();
        io::copy(&mut entry, &mut io::sink()).map_err(|err| ArchiveError::Malformed {
            path: path.display().to_string(),
            message: format!("entry {} failed integrity check: {}", name, err),
        })?;
    }

    Ok(())
}
