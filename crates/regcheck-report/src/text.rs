//! Human-readable text report.

use std::fmt;

use chrono::NaiveDateTime;
use regcheck_model::{CheckRecord, StatusCounts};
use regcheck_validate::ValidationRun;

/// Timestamp layout used in every report.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Text rendering of a validation run.
///
/// Renders through [`fmt::Display`], so `to_string()` produces the full
/// report.
pub struct TextReport<'a> {
    run: &'a ValidationRun,
    generated_at: NaiveDateTime,
}

impl<'a> TextReport<'a> {
    pub fn new(run: &'a ValidationRun, generated_at: NaiveDateTime) -> Self {
        Self { run, generated_at }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.run.summary;

        writeln!(f, "=== REGULATORY VALIDATION REPORT ===")?;
        writeln!(
            f,
            "Report generated on: {}",
            self.generated_at.format(TIMESTAMP_FORMAT)
        )?;
        writeln!(f, "Total files validated: {}", summary.files_validated)?;
        writeln!(f)?;

        write_counts(f, "Validation Summary", &summary.validation)?;
        writeln!(f)?;
        write_counts(f, "Integrity Summary", &summary.integrity)?;
        writeln!(f)?;
        writeln!(f, "Overall Compliance: {}", summary.compliance)?;
        writeln!(f)?;

        writeln!(f, "Detailed Validation Results:")?;
        for result in &self.run.validation {
            write_record(f, result)?;
        }

        writeln!(f)?;
        writeln!(f, "=== FILE INTEGRITY CHECKS ===")?;
        for result in &self.run.integrity {
            write_record(f, result)?;
        }
        Ok(())
    }
}

fn write_counts(f: &mut fmt::Formatter<'_>, title: &str, counts: &StatusCounts) -> fmt::Result {
    writeln!(f, "{title}:")?;
    writeln!(f, "  PASS: {}", counts.pass)?;
    writeln!(f, "  FAIL: {}", counts.fail)?;
    writeln!(f, "  WARN: {}", counts.warn)?;
    writeln!(f, "  ERROR: {}", counts.error)
}

fn write_record(f: &mut fmt::Formatter<'_>, record: &dyn CheckRecord) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "File: {}", record.file_name())?;
    for (label, status) in record.statuses() {
        writeln!(f, "  {label}: {status}")?;
    }
    if !record.issues().is_empty() {
        writeln!(f, "  Issues: {}", record.issues().join(", "))?;
    }
    if record.halted() {
        writeln!(f, "  Note: validation stopped early, later checks were not evaluated")?;
    }
    Ok(())
}
