//! Report generation for regcheck validation runs.
//!
//! - **Text**: `validation_report.txt`, the human-readable report
//! - **CSV**: `validation_results.csv` and `integrity_results.csv`
//! - **JSON**: `validation_report.json`, summary plus every result record
//!
//! The generation timestamp is always passed in so output is reproducible.

mod error;
mod export;
mod json;
mod text;
mod writer;

pub use error::{ReportError, Result};
pub use export::{
    ISSUE_SEPARATOR, integrity_header, validation_header, write_integrity_csv,
    write_validation_csv,
};
pub use json::write_json_report;
pub use text::{TIMESTAMP_FORMAT, TextReport};
pub use writer::{
    INTEGRITY_CSV_FILE, JSON_REPORT_FILE, ReportFormat, TEXT_REPORT_FILE, VALIDATION_CSV_FILE,
    write_reports,
};
