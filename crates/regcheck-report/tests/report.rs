//! Integration tests for report generation.

use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use regcheck_model::{
    AssessmentCheck, CheckStatus, FileChecks, IntegrityResult, PassNote, StructureCheck,
    TabularCheck, ValidationResult,
};
use regcheck_report::{
    INTEGRITY_CSV_FILE, JSON_REPORT_FILE, ReportFormat, TEXT_REPORT_FILE, TextReport,
    VALIDATION_CSV_FILE, write_reports,
};
use regcheck_validate::{ValidationRun, aggregate};
use tempfile::TempDir;

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn sample_run() -> ValidationRun {
    let mut dm = FileChecks::<TabularCheck>::new("dm.xpt");
    dm.flag(
        TabularCheck::RequiredVariables,
        CheckStatus::Fail,
        "Missing required variables: USUBJID",
    );
    let ligands = FileChecks::<StructureCheck>::new("ligands.sdf");
    let mut review = FileChecks::<AssessmentCheck>::new("review.asnt");
    review.mark_pass(AssessmentCheck::Asn1Structure, PassNote::Xml);

    let validation = vec![
        ValidationResult::from(dm),
        ValidationResult::from(ligands),
        ValidationResult::from(review),
    ];
    let integrity: Vec<IntegrityResult> = ["dm.xpt", "ligands.sdf", "review.asnt"]
        .into_iter()
        .map(IntegrityResult::new)
        .collect();

    ValidationRun {
        summary: aggregate(&validation, &integrity),
        validation,
        integrity,
    }
}

#[test]
fn test_text_report_snapshot() {
    let text = TextReport::new(&sample_run(), generated_at()).to_string();
    insta::assert_snapshot!("text_report", text);
}

#[test]
fn test_text_report_notes_halted_files() {
    let mut broken = FileChecks::<TabularCheck>::new("broken.xpt");
    broken.flag(
        TabularCheck::FormatCheck,
        CheckStatus::Error,
        "Error reading file: invalid XPT file: file too small",
    );
    broken.halt();
    let validation = vec![ValidationResult::from(broken)];
    let integrity = vec![IntegrityResult::new("broken.xpt")];
    let run = ValidationRun {
        summary: aggregate(&validation, &integrity),
        validation,
        integrity,
    };

    let text = TextReport::new(&run, generated_at()).to_string();
    assert!(text.contains("  Format Check: ERROR\n"));
    assert!(text.contains("  Note: validation stopped early, later checks were not evaluated\n"));
    assert!(text.contains("Overall Compliance: REVIEW REQUIRED\n"));
}

#[test]
fn test_write_reports_creates_every_artifact() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out");

    let written = write_reports(&sample_run(), &output, &ReportFormat::ALL, generated_at()).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            TEXT_REPORT_FILE,
            VALIDATION_CSV_FILE,
            INTEGRITY_CSV_FILE,
            JSON_REPORT_FILE
        ]
    );
    let expected: Vec<&str> = ReportFormat::ALL
        .iter()
        .flat_map(|format| format.file_names().iter().copied())
        .collect();
    assert_eq!(names, expected);

    let text = fs::read_to_string(output.join(TEXT_REPORT_FILE)).unwrap();
    assert!(text.starts_with("=== REGULATORY VALIDATION REPORT ===\n"));

    let validation_csv = fs::read_to_string(output.join(VALIDATION_CSV_FILE)).unwrap();
    let lines: Vec<&str> = validation_csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("File,Validator,Format Check,"));
    assert!(lines[0].ends_with(",Issues"));
    assert!(lines[1].starts_with("dm.xpt,XPT,PASS,PASS,FAIL,PASS,"));
    assert!(lines[3].contains("PASS (XML)"));

    let integrity_csv = fs::read_to_string(output.join(INTEGRITY_CSV_FILE)).unwrap();
    assert_eq!(
        integrity_csv.lines().nth(1),
        Some("dm.xpt,PASS,PASS,PASS,")
    );
}

#[test]
fn test_json_report_contents() {
    let dir = TempDir::new().unwrap();
    write_reports(
        &sample_run(),
        dir.path(),
        &[ReportFormat::Json],
        generated_at(),
    )
    .unwrap();

    let json = fs::read_to_string(dir.path().join(JSON_REPORT_FILE)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["generated_at"], "2024-05-01 09:30:00");
    assert_eq!(value["summary"]["files_validated"], 3);
    assert_eq!(value["summary"]["compliance"], "review_required");
    assert_eq!(value["summary"]["totals"]["fail"], 1);
    assert_eq!(value["validation"][0]["validator"], "tabular");
    assert_eq!(
        value["validation"][2]["checks"]["ASN.1 Structure"],
        "PASS (XML)"
    );
    assert_eq!(value["integrity"].as_array().unwrap().len(), 3);
    assert!(!dir.path().join(TEXT_REPORT_FILE).exists());
}
