//! Tests for submission file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use regcheck_ingest::{IngestError, discover_files, read_text};
use regcheck_model::FileKind;
use tempfile::TempDir;

fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(&path, "content").expect("write file");
    path
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn discovers_nested_files_by_extension() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "m5/datasets/tabulations/sdtm/dm.xpt");
    touch(dir.path(), "m5/datasets/tabulations/sdtm/AE.XPT");
    touch(dir.path(), "m3/ligands.sdf");
    touch(dir.path(), "review/assessment.asnt");
    touch(dir.path(), "review/define.xml");
    touch(dir.path(), "README.md");

    let files = discover_files(dir.path()).unwrap();

    assert_eq!(files.len(), 4);
    assert_eq!(names(&files.tabular), vec!["AE.XPT", "dm.xpt"]);
    assert_eq!(names(&files.structure), vec!["ligands.sdf"]);
    assert_eq!(names(&files.assessment), vec!["assessment.asnt"]);
}

#[test]
fn iteration_follows_dispatch_order() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "a.asnt");
    touch(dir.path(), "b.sdf");
    touch(dir.path(), "c.xpt");

    let files = discover_files(dir.path()).unwrap();
    let order: Vec<(FileKind, String)> = files
        .iter()
        .map(|(kind, path)| {
            (
                kind,
                path.file_name().unwrap().to_string_lossy().into_owned(),
            )
        })
        .collect();

    assert_eq!(
        order,
        vec![
            (FileKind::Tabular, "c.xpt".to_string()),
            (FileKind::Structure, "b.sdf".to_string()),
            (FileKind::Assessment, "a.asnt".to_string()),
        ]
    );
}

#[test]
fn empty_directory_discovers_nothing() {
    let dir = TempDir::new().unwrap();
    let files = discover_files(dir.path()).unwrap();
    assert!(files.is_empty());
}

#[test]
fn missing_root_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = discover_files(&dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}

#[test]
fn read_text_rejects_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.sdf");
    fs::write(&path, b"\xFF\xFE\xFD").unwrap();
    assert!(matches!(
        read_text(&path),
        Err(IngestError::Undecodable { .. })
    ));

    let err = read_text(&dir.path().join("missing.sdf")).unwrap_err();
    assert!(matches!(err, IngestError::FileRead { .. }));
}
