//! Assessment file checks.
//!
//! An assessment file is either an XML document (it starts with `<?xml`)
//! or ASN.1 value notation in plain text.

use std::path::Path;

use regcheck_ingest::{UNKNOWN_ENCODING, decode_utf8, detect_encoding, read_bytes};
use regcheck_model::{AssessmentCheck, CheckStatus, FileChecks, PassNote};
use tracing::debug;

use super::display_name;
use crate::options::ValidationOptions;
use crate::policy::{ASN1_ASSIGNMENT, MANDATORY_FIELDS, is_accepted_encoding};
use crate::xml::parse_document;

const XML_DECLARATION: &str = "<?xml";

/// Validate an assessment file.
pub fn check(path: &Path, options: &ValidationOptions) -> FileChecks<AssessmentCheck> {
    let mut result = FileChecks::new(display_name(path));

    match read_bytes(path) {
        Ok(bytes) => check_bytes(&bytes, options, &mut result),
        Err(err) => {
            result.flag(
                AssessmentCheck::Asn1Structure,
                CheckStatus::Error,
                format!("Error reading file: {err}"),
            );
            result.halt();
        }
    }

    debug!(file = %path.display(), "assessment file checked");
    result
}

/// Run the encoding and content checks on raw file bytes.
pub fn check_bytes(
    bytes: &[u8],
    options: &ValidationOptions,
    result: &mut FileChecks<AssessmentCheck>,
) {
    let encoding = if options.encoding_detection {
        detect_encoding(bytes)
    } else {
        UNKNOWN_ENCODING.to_string()
    };
    debug!(%encoding, "detected encoding");

    if !is_accepted_encoding(&encoding) {
        result.flag(
            AssessmentCheck::Encoding,
            CheckStatus::Warn,
            format!("Encoding {encoding} may not be compliant"),
        );
    }

    let Some(text) = decode_utf8(bytes) else {
        result.flag(
            AssessmentCheck::Encoding,
            CheckStatus::Fail,
            "Cannot decode file content",
        );
        result.halt();
        return;
    };

    if text.starts_with(XML_DECLARATION) {
        check_xml(&text, result);
    } else {
        result.mark_pass(AssessmentCheck::Asn1Structure, PassNote::Text);
        if !text.contains(ASN1_ASSIGNMENT) {
            result.flag(
                AssessmentCheck::SchemaCompliance,
                CheckStatus::Warn,
                "No ASN.1 definitions found",
            );
        }
    }
}

fn check_xml(text: &str, result: &mut FileChecks<AssessmentCheck>) {
    let document = match parse_document(text) {
        Ok(document) => document,
        Err(err) => {
            result.flag(
                AssessmentCheck::SchemaCompliance,
                CheckStatus::Fail,
                format!("Invalid XML: {err}"),
            );
            result.halt();
            return;
        }
    };

    result.mark_pass(AssessmentCheck::Asn1Structure, PassNote::Xml);

    let missing: Vec<&str> = MANDATORY_FIELDS
        .into_iter()
        .filter(|field| !document.has_text_child(field))
        .collect();
    if !missing.is_empty() {
        result.flag(
            AssessmentCheck::MandatoryFields,
            CheckStatus::Fail,
            format!("Missing mandatory fields: {}", missing.join(", ")),
        );
    }
}
