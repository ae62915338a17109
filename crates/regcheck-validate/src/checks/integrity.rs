//! Generic file integrity checks.
//!
//! Runs on every target file regardless of format: existence, size and
//! readability of a short prefix.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use regcheck_model::{CheckStatus, IntegrityCheck, IntegrityResult};
use tracing::debug;

use super::display_name;
use crate::policy::{MAX_FILE_SIZE_BYTES, READ_PROBE_BYTES};

/// Check that a file exists, has a reasonable size and can be read.
pub fn check(path: &Path) -> IntegrityResult {
    let mut result = IntegrityResult::new(display_name(path));

    let exists = match path.try_exists() {
        Ok(exists) => exists,
        Err(err) => {
            result.flag(
                IntegrityCheck::Readable,
                CheckStatus::Error,
                format!("Error checking file: {err}"),
            );
            result.halt();
            return result;
        }
    };
    if !exists {
        result.flag(
            IntegrityCheck::FileExists,
            CheckStatus::Fail,
            "File does not exist",
        );
        result.halt();
        return result;
    }

    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) => {
            result.flag(
                IntegrityCheck::Readable,
                CheckStatus::Error,
                format!("Error checking file: {err}"),
            );
            result.halt();
            return result;
        }
    };

    let size = metadata.len();
    if size > MAX_FILE_SIZE_BYTES {
        let megabytes = size as f64 / (1024.0 * 1024.0);
        result.flag(
            IntegrityCheck::FileSize,
            CheckStatus::Warn,
            format!("File size {megabytes:.2}MB exceeds typical limits"),
        );
    }

    if let Err(err) = read_probe(path) {
        result.flag(
            IntegrityCheck::Readable,
            CheckStatus::Fail,
            format!("File not readable: {err}"),
        );
    }

    debug!(file = %path.display(), size, "integrity checked");
    result
}

fn read_probe(path: &Path) -> std::io::Result<()> {
    let mut buffer = Vec::with_capacity(READ_PROBE_BYTES);
    File::open(path)?
        .take(READ_PROBE_BYTES as u64)
        .read_to_end(&mut buffer)?;
    Ok(())
}
