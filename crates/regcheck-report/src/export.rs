//! CSV exports of validation and integrity results.
//!
//! The validation export has one column per check of every validator kind,
//! so rows from different validators line up in a single table. Cells for
//! checks a validator does not run are left empty.

use std::io::Write;

use regcheck_model::{
    AssessmentCheck, CheckRecord, IntegrityCheck, IntegrityResult, StructureCheck, TabularCheck,
    ValidationResult, labels,
};

/// Separator between issues inside one CSV cell.
pub const ISSUE_SEPARATOR: &str = "; ";

/// Header of the validation export.
pub fn validation_header() -> Vec<&'static str> {
    let mut header = vec!["File", "Validator"];
    header.extend(labels::<TabularCheck>());
    header.extend(labels::<StructureCheck>());
    header.extend(labels::<AssessmentCheck>());
    header.push("Issues");
    header
}

/// Header of the integrity export.
pub fn integrity_header() -> Vec<&'static str> {
    let mut header = vec!["File"];
    header.extend(labels::<IntegrityCheck>());
    header.push("Issues");
    header
}

/// Write one row per validation result.
pub fn write_validation_csv<W: Write>(writer: W, results: &[ValidationResult]) -> csv::Result<()> {
    let header = validation_header();
    let check_columns = &header[2..header.len() - 1];

    let mut table = csv::Writer::from_writer(writer);
    table.write_record(&header)?;
    for result in results {
        let statuses = result.statuses();
        let mut row = Vec::with_capacity(header.len());
        row.push(result.file_name().to_string());
        row.push(result.kind().label().to_string());
        row.extend(check_columns.iter().map(|column| {
            statuses
                .iter()
                .find(|(label, _)| label == column)
                .map(|(_, status)| status.to_string())
                .unwrap_or_default()
        }));
        row.push(result.issues().join(ISSUE_SEPARATOR));
        table.write_record(&row)?;
    }
    table.flush()?;
    Ok(())
}

/// Write one row per integrity result.
pub fn write_integrity_csv<W: Write>(writer: W, results: &[IntegrityResult]) -> csv::Result<()> {
    let mut table = csv::Writer::from_writer(writer);
    table.write_record(integrity_header())?;
    for result in results {
        let mut row = vec![result.file_name().to_string()];
        row.extend(
            result
                .statuses()
                .into_iter()
                .map(|(_, status)| status.to_string()),
        );
        row.push(result.issues().join(ISSUE_SEPARATOR));
        table.write_record(&row)?;
    }
    table.flush()?;
    Ok(())
}
