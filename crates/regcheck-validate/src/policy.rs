//! Fixed validation policy.

use regcheck_xpt::XptVersion;

/// Files larger than this draw a `File Size` warning (100 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 100 * 1024 * 1024;

/// Bytes read to prove a file is readable.
pub const READ_PROBE_BYTES: usize = 1024;

/// Transport version accepted for tabular datasets.
pub const EXPECTED_XPT_VERSION: XptVersion = XptVersion::V5;

/// Variables every tabular dataset must carry, in check order.
pub const REQUIRED_VARIABLES: [&str; 2] = ["STUDYID", "USUBJID"];

/// Columns whose name contains this marker are sequence keys.
pub const SEQUENCE_MARKER: &str = "SEQ";

/// Root children an XML assessment must carry with non-empty text.
pub const MANDATORY_FIELDS: [&str; 3] = ["StudyID", "Reviewer", "AssessmentDate"];

/// Encodings accepted for assessment files (compared case-insensitively).
pub const ACCEPTED_ENCODINGS: [&str; 2] = ["utf-8", "ascii"];

/// Marker of an ASN.1 type assignment.
pub const ASN1_ASSIGNMENT: &str = "::=";

/// Whether an encoding name is on the accepted list.
pub fn is_accepted_encoding(name: &str) -> bool {
    ACCEPTED_ENCODINGS
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(name))
}
