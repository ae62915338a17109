//! Byte-level encoding detection and strict text decoding.

use std::borrow::Cow;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

use crate::error::{IngestError, Result};

/// Name reported when encoding detection is switched off.
pub const UNKNOWN_ENCODING: &str = "unknown";

/// Name reported for UTF-8 content that starts with a byte-order mark.
pub const UTF8_SIG_ENCODING: &str = "UTF-8-SIG";

/// Read a whole file into memory.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Best-effort name of the encoding of `bytes`.
///
/// Pure ASCII input is reported as `ascii`. A byte-order mark decides the
/// encoding outright, with a UTF-8 mark reported as `UTF-8-SIG`. Otherwise the
/// guess comes from a statistical detector and is reported by its WHATWG name
/// (e.g. `UTF-8`, `windows-1252`).
pub fn detect_encoding(bytes: &[u8]) -> String {
    if bytes.is_ascii() {
        return "ascii".to_string();
    }

    match Encoding::for_bom(bytes) {
        Some((encoding, _)) if encoding == UTF_8 => return UTF8_SIG_ENCODING.to_string(),
        Some((encoding, _)) => return encoding.name().to_string(),
        None => {}
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true).name().to_string()
}

/// Decode `bytes` as UTF-8 without replacement.
///
/// A leading UTF-8 byte-order mark is dropped. ASCII is a subset of UTF-8,
/// so ASCII content decodes through the same path. Returns `None` when any
/// byte sequence is malformed.
pub fn decode_utf8(bytes: &[u8]) -> Option<Cow<'_, str>> {
    let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    UTF_8.decode_without_bom_handling_and_without_replacement(body)
}

/// Read a file as strict UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = read_bytes(path)?;
    decode_utf8(&bytes)
        .map(Cow::into_owned)
        .ok_or_else(|| IngestError::Undecodable {
            path: path.to_path_buf(),
        })
}
