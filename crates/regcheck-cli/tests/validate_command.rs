//! Integration tests for the validate and formats commands.

use std::fs;
use std::path::Path;

use regcheck_cli::cli::{ReportFormatArg, ValidateArgs};
use regcheck_cli::commands::{run_formats, run_validate};
use regcheck_report::{
    INTEGRITY_CSV_FILE, JSON_REPORT_FILE, TEXT_REPORT_FILE, VALIDATION_CSV_FILE,
};
use regcheck_xpt::fixture;
use regcheck_xpt::{XptColumn, XptDataset, XptValue};
use tempfile::TempDir;

fn args(dir: &Path) -> ValidateArgs {
    ValidateArgs {
        dir: dir.to_path_buf(),
        output_dir: None,
        format: ReportFormatArg::All,
        dry_run: false,
        no_encoding_detection: false,
    }
}

fn write_submission(dir: &Path, with_usubjid: bool) {
    let mut columns = vec![XptColumn::character("STUDYID", 8)];
    let mut row = vec![XptValue::character("STUDY01")];
    if with_usubjid {
        columns.push(XptColumn::character("USUBJID", 12));
        row.push(XptValue::character("STUDY01-001"));
    }
    let mut dataset = XptDataset::with_columns("DM", columns);
    dataset.add_row(row);
    fixture::write_dataset(&dir.join("dm.xpt"), &dataset).unwrap();

    fs::write(
        dir.join("review.asnt"),
        "Assessment ::= SEQUENCE { reviewer UTF8String }\n",
    )
    .unwrap();
}

#[test]
fn test_compliant_submission_writes_all_reports() {
    let dir = TempDir::new().unwrap();
    write_submission(dir.path(), true);

    let outcome = run_validate(&args(dir.path())).unwrap();
    assert!(outcome.is_compliant());
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(outcome.run.summary.files_validated, 2);
    assert_eq!(outcome.output_dir.as_deref(), Some(dir.path()));
    assert_eq!(outcome.reports.len(), 4);
    for name in [
        TEXT_REPORT_FILE,
        VALIDATION_CSV_FILE,
        INTEGRITY_CSV_FILE,
        JSON_REPORT_FILE,
    ] {
        assert!(dir.path().join(name).is_file(), "{name} missing");
    }
}

#[test]
fn test_review_required_exit_code() {
    let dir = TempDir::new().unwrap();
    write_submission(dir.path(), false);

    let outcome = run_validate(&args(dir.path())).unwrap();
    assert!(!outcome.is_compliant());
    assert_eq!(outcome.exit_code(), 1);

    let report = fs::read_to_string(dir.path().join(TEXT_REPORT_FILE)).unwrap();
    assert!(report.contains("Issues: Missing required variables: USUBJID"));
    assert!(report.contains("Overall Compliance: REVIEW REQUIRED"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write_submission(dir.path(), true);

    let mut args = args(dir.path());
    args.dry_run = true;
    let outcome = run_validate(&args).unwrap();
    assert!(outcome.output_dir.is_none());
    assert!(outcome.reports.is_empty());
    assert!(!dir.path().join(TEXT_REPORT_FILE).exists());
}

#[test]
fn test_output_dir_and_single_format() {
    let dir = TempDir::new().unwrap();
    write_submission(dir.path(), true);
    let out = dir.path().join("reports");

    let mut args = args(dir.path());
    args.output_dir = Some(out.clone());
    args.format = ReportFormatArg::Csv;
    let outcome = run_validate(&args).unwrap();
    assert_eq!(
        outcome.reports,
        vec![out.join(VALIDATION_CSV_FILE), out.join(INTEGRITY_CSV_FILE)]
    );
    assert!(!out.join(JSON_REPORT_FILE).exists());
}

#[test]
fn test_disabled_encoding_detection_warns() {
    let dir = TempDir::new().unwrap();
    write_submission(dir.path(), true);

    let mut args = args(dir.path());
    args.no_encoding_detection = true;
    args.dry_run = true;
    let outcome = run_validate(&args).unwrap();
    assert_eq!(outcome.run.summary.validation.warn, 1);
    assert!(outcome.is_compliant());
}

#[test]
fn test_missing_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let error = run_validate(&args(&dir.path().join("absent"))).unwrap_err();
    assert!(error.to_string().starts_with("discover submission files in"));
}

#[test]
fn test_formats_command() {
    run_formats().unwrap();
}
