//! End-to-end validator tests over files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use regcheck_model::{
    AssessmentCheck, CheckRecord, CheckStatus, FileKind, PassNote, Severity, StructureCheck,
    TabularCheck, ValidationResult,
};
use regcheck_validate::checks::{assessment, structure, tabular};
use regcheck_validate::{ValidationOptions, validate_directory};
use regcheck_xpt::fixture;
use regcheck_xpt::{XptColumn, XptDataset, XptValue};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn write_dataset(dir: &Path, name: &str, dataset: &XptDataset) -> PathBuf {
    let path = dir.join(name);
    fixture::write_dataset(&path, dataset).expect("write xpt fixture");
    path
}

fn demographics() -> XptDataset {
    let mut dataset = XptDataset::with_columns(
        "DM",
        vec![
            XptColumn::character("STUDYID", 8),
            XptColumn::character("USUBJID", 16),
            XptColumn::numeric("AGE"),
        ],
    );
    dataset.add_row(vec![
        XptValue::character("STUDY01"),
        XptValue::character("STUDY01-001"),
        XptValue::numeric(41.0),
    ]);
    dataset
}

const VALID_SDF: &str = "aspirin-fragment
  regcheck

  2  1  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.2000    0.0000    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  2  0
M  END
> <ID>
ASP-1

$$$$
";

const EMPTY_MOLECULE_SDF: &str = "empty
  regcheck

  0  0  0  0  0  0  0  0  0  0999 V2000
M  END
> <ID>
EMPTY-1

$$$$
";

/// Every non-pass status must be explained by at least one issue.
fn assert_explained(record: &dyn CheckRecord) {
    let failing = record
        .statuses()
        .iter()
        .filter(|(_, status)| !status.is_pass())
        .count();
    if failing > 0 {
        assert!(
            !record.issues().is_empty(),
            "{} has non-pass checks without issues",
            record.file_name()
        );
    }
}

#[test]
fn tabular_both_required_variables_missing() {
    let dir = TempDir::new().unwrap();
    let mut dataset = XptDataset::with_columns("LB", vec![XptColumn::numeric("LBSEQ")]);
    dataset.add_row(vec![XptValue::numeric(1.0)]);
    let path = write_dataset(dir.path(), "lb.xpt", &dataset);

    let result = tabular::check(&path);
    assert_eq!(result.status(TabularCheck::FormatCheck), CheckStatus::Pass);
    assert_eq!(result.status(TabularCheck::RequiredVariables), CheckStatus::Fail);
    assert_eq!(
        result.issues(),
        ["Missing required variables: STUDYID, USUBJID"]
    );
    assert_explained(&result);
}

#[test]
fn tabular_complete_dataset_passes() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(dir.path(), "dm.xpt", &demographics());

    let result = tabular::check(&path);
    assert_eq!(result.status(TabularCheck::RequiredVariables), CheckStatus::Pass);
    assert_eq!(result.status(TabularCheck::DataIntegrity), CheckStatus::Pass);
    assert!(result.issues().is_empty());
}

#[test]
fn tabular_null_required_value_fails_integrity() {
    let dir = TempDir::new().unwrap();
    let mut dataset = demographics();
    dataset.add_row(vec![
        XptValue::character("STUDY01"),
        XptValue::character(""),
        XptValue::numeric(50.0),
    ]);
    let path = write_dataset(dir.path(), "dm.xpt", &dataset);

    let result = tabular::check(&path);
    assert_eq!(result.status(TabularCheck::DataIntegrity), CheckStatus::Fail);
    assert_eq!(result.issues(), ["Null values in USUBJID"]);
}

#[test]
fn structure_no_records() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "empty.sdf", "\n$$$$\n   \n");

    let result = structure::check(&path);
    assert_eq!(result.status(StructureCheck::StructureCheck), CheckStatus::Fail);
    assert_eq!(result.status(StructureCheck::MoleculeCount), CheckStatus::Pass);
    assert_eq!(result.issues(), ["No molecules found"]);
}

#[test]
fn structure_zero_atom_record() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "empty_mol.sdf", EMPTY_MOLECULE_SDF);

    let result = structure::check(&path);
    assert_eq!(result.status(StructureCheck::Connectivity), CheckStatus::Fail);
    assert_eq!(result.status(StructureCheck::MoleculeCount), CheckStatus::Pass);
    assert_eq!(result.issues(), ["Molecule 1: No atoms"]);
}

#[test]
fn structure_unreadable_text_is_error() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "binary.sdf", [0xFF, 0xFE, 0x00, 0x80]);

    let result = structure::check(&path);
    assert_eq!(result.status(StructureCheck::StructureCheck), CheckStatus::Error);
    assert!(result.issues()[0].starts_with("Error reading file: "));
}

#[test]
fn assessment_undecodable_bytes() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "latin.asnt", b"Reviewer ::= \"J\xE9r\xF4me\"\n");

    let result = assessment::check(&path, &ValidationOptions::default());
    assert_eq!(result.status(AssessmentCheck::Encoding), CheckStatus::Fail);
    assert_eq!(result.status(AssessmentCheck::Asn1Structure), CheckStatus::Pass);
    assert_eq!(result.issues().last().unwrap(), "Cannot decode file content");
    assert_explained(&result);
}

#[test]
fn assessment_xml_missing_reviewer() {
    let dir = TempDir::new().unwrap();
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<Assessment>
  <StudyID>STUDY01</StudyID>
  <AssessmentDate>2024-03-01</AssessmentDate>
</Assessment>
"#;
    let path = write(dir.path(), "review.asnt", xml);

    let result = assessment::check(&path, &ValidationOptions::default());
    assert_eq!(result.status(AssessmentCheck::MandatoryFields), CheckStatus::Fail);
    assert_eq!(
        result.status(AssessmentCheck::Asn1Structure),
        CheckStatus::PassVariant(PassNote::Xml)
    );
    assert_eq!(result.issues(), ["Missing mandatory fields: Reviewer"]);
}

#[test]
fn assessment_empty_field_counts_as_missing() {
    let dir = TempDir::new().unwrap();
    let xml = "<?xml version=\"1.0\"?><Assessment><StudyID>S</StudyID>\
               <Reviewer></Reviewer><AssessmentDate> </AssessmentDate></Assessment>";
    let path = write(dir.path(), "review.asnt", xml);

    let result = assessment::check(&path, &ValidationOptions::default());
    assert_eq!(
        result.issues(),
        ["Missing mandatory fields: Reviewer, AssessmentDate"]
    );
}

#[test]
fn directory_run_covers_every_file() {
    let dir = TempDir::new().unwrap();
    write_dataset(dir.path(), "dm.xpt", &demographics());
    write(dir.path(), "ligands.sdf", VALID_SDF);
    fs::create_dir(dir.path().join("review")).unwrap();
    write(
        dir.path(),
        "review/assessment.asnt",
        "Assessment ::= SEQUENCE { reviewer UTF8String }\n",
    );
    write(dir.path(), "notes.txt", "ignored");

    let run = validate_directory(dir.path(), &ValidationOptions::default()).unwrap();

    let kinds: Vec<FileKind> = run.validation.iter().map(ValidationResult::kind).collect();
    assert_eq!(
        kinds,
        vec![FileKind::Tabular, FileKind::Structure, FileKind::Assessment]
    );
    assert_eq!(run.integrity.len(), 3);
    assert_eq!(run.summary.files_validated, 3);
    assert_eq!(run.summary.validation.total(), 12);
    assert_eq!(run.summary.integrity.total(), 9);
    assert!(run.summary.overall_compliance());

    for result in &run.validation {
        assert_explained(result);
        assert!(result.worst() <= Severity::Warn);
    }
}

#[test]
fn directory_run_flags_broken_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "broken.xpt", "not a transport file");
    write(dir.path(), "ligands.sdf", VALID_SDF);

    let run = validate_directory(dir.path(), &ValidationOptions::default()).unwrap();
    assert_eq!(run.summary.validation.error, 1);
    assert!(!run.summary.overall_compliance());
    assert!(run.validation[0].halted());
}
