//! Dispatch discovered files to their validators.

use std::path::Path;
use std::time::Instant;

use regcheck_ingest::{DiscoveredFiles, discover_files};
use regcheck_model::{AggregateReport, CheckRecord, FileKind, IntegrityResult, ValidationResult};
use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::aggregate::aggregate;
use crate::checks::{assessment, integrity, structure, tabular};
use crate::options::ValidationOptions;

/// Everything produced by one validation run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationRun {
    pub summary: AggregateReport,
    pub validation: Vec<ValidationResult>,
    pub integrity: Vec<IntegrityResult>,
}

/// Run the format validator matching `kind` on one file.
pub fn validate_file(kind: FileKind, path: &Path, options: &ValidationOptions) -> ValidationResult {
    match kind {
        FileKind::Tabular => tabular::check(path).into(),
        FileKind::Structure => structure::check(path).into(),
        FileKind::Assessment => assessment::check(path, options).into(),
    }
}

/// Validate every discovered file.
pub fn validate_files(files: &DiscoveredFiles, options: &ValidationOptions) -> ValidationRun {
    validate_files_with_progress(files, options, |_, _| {})
}

/// Validate every discovered file, reporting each file before it is checked.
///
/// Format validation runs over all files in dispatch order, then the
/// integrity checks run over the same files in the same order.
pub fn validate_files_with_progress(
    files: &DiscoveredFiles,
    options: &ValidationOptions,
    mut progress: impl FnMut(FileKind, &Path),
) -> ValidationRun {
    let span = info_span!("validate", files = files.len());
    let _guard = span.enter();
    let start = Instant::now();

    let validation: Vec<ValidationResult> = files
        .iter()
        .map(|(kind, path)| {
            progress(kind, path);
            let result = validate_file(kind, path, options);
            debug!(
                file = %path.display(),
                %kind,
                worst = %result.worst(),
                issues = result.issues().len(),
                "validated"
            );
            result
        })
        .collect();

    let integrity: Vec<IntegrityResult> = files
        .iter()
        .map(|(_, path)| integrity::check(path))
        .collect();

    let summary = aggregate(&validation, &integrity);
    info!(
        files = summary.files_validated,
        pass = summary.totals.pass,
        warn = summary.totals.warn,
        fail = summary.totals.fail,
        error = summary.totals.error,
        compliance = %summary.compliance,
        duration_ms = start.elapsed().as_millis(),
        "validation complete"
    );

    ValidationRun {
        summary,
        validation,
        integrity,
    }
}

/// Discover and validate every submission file under `root`.
pub fn validate_directory(
    root: &Path,
    options: &ValidationOptions,
) -> regcheck_ingest::Result<ValidationRun> {
    let files = discover_files(root)?;
    Ok(validate_files(&files, options))
}
