//! JSON export of a validation run.

use std::io::Write;

use chrono::NaiveDateTime;
use regcheck_model::{AggregateReport, IntegrityResult, ValidationResult};
use regcheck_validate::ValidationRun;
use serde::Serialize;

use crate::text::TIMESTAMP_FORMAT;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    summary: &'a AggregateReport,
    validation: &'a [ValidationResult],
    integrity: &'a [IntegrityResult],
}

/// Write the summary and every result record as pretty-printed JSON.
pub fn write_json_report<W: Write>(
    writer: W,
    run: &ValidationRun,
    generated_at: NaiveDateTime,
) -> serde_json::Result<()> {
    let report = JsonReport {
        generated_at: generated_at.format(TIMESTAMP_FORMAT).to_string(),
        summary: &run.summary,
        validation: &run.validation,
        integrity: &run.integrity,
    };
    serde_json::to_writer_pretty(writer, &report)
}
