//! Streaming SHA-256 content digests.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Read buffer size. Keeps memory use independent of file size.
const CHUNK_SIZE: usize = 64 * 1024;

/// SHA-256 of a file's full contents, as a lowercase hex string.
pub fn file_sha256(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    sha256_chunked(file, CHUNK_SIZE)
}

fn sha256_chunked<R: Read>(mut reader: R, chunk_size: usize) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; chunk_size];

    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}
