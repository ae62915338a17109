//! Write report artifacts for a run into an output directory.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use regcheck_validate::ValidationRun;
use tracing::{debug, info};

use crate::error::{ReportError, Result};
use crate::export::{write_integrity_csv, write_validation_csv};
use crate::json::write_json_report;
use crate::text::TextReport;

pub const TEXT_REPORT_FILE: &str = "validation_report.txt";
pub const VALIDATION_CSV_FILE: &str = "validation_results.csv";
pub const INTEGRITY_CSV_FILE: &str = "integrity_results.csv";
pub const JSON_REPORT_FILE: &str = "validation_report.json";

/// Report artifact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    /// `validation_report.txt`
    Text,
    /// `validation_results.csv` and `integrity_results.csv`
    Csv,
    /// `validation_report.json`
    Json,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 3] = [ReportFormat::Text, ReportFormat::Csv, ReportFormat::Json];

    /// File names written for this format.
    pub fn file_names(self) -> &'static [&'static str] {
        match self {
            ReportFormat::Text => &[TEXT_REPORT_FILE],
            ReportFormat::Csv => &[VALIDATION_CSV_FILE, INTEGRITY_CSV_FILE],
            ReportFormat::Json => &[JSON_REPORT_FILE],
        }
    }
}

/// Write the requested report formats into `output_dir`.
///
/// The directory is created when missing. Returns the written paths in
/// the order of `formats`.
pub fn write_reports(
    run: &ValidationRun,
    output_dir: &Path,
    formats: &[ReportFormat],
    generated_at: NaiveDateTime,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).map_err(|source| ReportError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut outputs = Vec::new();
    for format in formats {
        match format {
            ReportFormat::Text => {
                let path = output_dir.join(TEXT_REPORT_FILE);
                let report = TextReport::new(run, generated_at).to_string();
                fs::write(&path, report).map_err(|source| ReportError::Write {
                    path: path.clone(),
                    source,
                })?;
                outputs.push(path);
            }
            ReportFormat::Csv => {
                let path = output_dir.join(VALIDATION_CSV_FILE);
                let file = create(&path)?;
                write_validation_csv(file, &run.validation)
                    .map_err(|source| ReportError::Csv {
                        path: path.clone(),
                        source,
                    })?;
                outputs.push(path);

                let path = output_dir.join(INTEGRITY_CSV_FILE);
                let file = create(&path)?;
                write_integrity_csv(file, &run.integrity).map_err(|source| ReportError::Csv {
                    path: path.clone(),
                    source,
                })?;
                outputs.push(path);
            }
            ReportFormat::Json => {
                let path = output_dir.join(JSON_REPORT_FILE);
                let mut file = create(&path)?;
                write_json_report(&mut file, run, generated_at).map_err(|source| {
                    ReportError::Json {
                        path: path.clone(),
                        source,
                    }
                })?;
                file.flush().map_err(|source| ReportError::Write {
                    path: path.clone(),
                    source,
                })?;
                outputs.push(path);
            }
        }
    }

    for path in &outputs {
        debug!(path = %path.display(), "wrote report");
    }
    info!(
        output_dir = %output_dir.display(),
        files = outputs.len(),
        "reports written"
    );
    Ok(outputs)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })
}
