//! Submission file discovery.

use std::path::{Path, PathBuf};

use regcheck_model::FileKind;
use tracing::{debug, trace};

use crate::error::{IngestError, Result};

/// Submission files found under a root directory, grouped by kind.
///
/// Each group is sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredFiles {
    pub tabular: Vec<PathBuf>,
    pub structure: Vec<PathBuf>,
    pub assessment: Vec<PathBuf>,
}

impl DiscoveredFiles {
    pub fn of_kind(&self, kind: FileKind) -> &[PathBuf] {
        match kind {
            FileKind::Tabular => &self.tabular,
            FileKind::Structure => &self.structure,
            FileKind::Assessment => &self.assessment,
        }
    }

    /// All files in dispatch order: tabular, then structure, then assessment.
    pub fn iter(&self) -> impl Iterator<Item = (FileKind, &Path)> {
        FileKind::ALL.into_iter().flat_map(move |kind| {
            self.of_kind(kind)
                .iter()
                .map(move |path| (kind, path.as_path()))
        })
    }

    pub fn len(&self) -> usize {
        self.tabular.len() + self.structure.len() + self.assessment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, kind: FileKind, path: PathBuf) {
        match kind {
            FileKind::Tabular => self.tabular.push(path),
            FileKind::Structure => self.structure.push(path),
            FileKind::Assessment => self.assessment.push(path),
        }
    }
}

/// Classify a path by its extension (case-insensitive).
pub fn classify(path: &Path) -> Option<FileKind> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(FileKind::from_extension)
}

/// Recursively discover submission files under `root`.
///
/// Files with unsupported extensions are ignored. Symlinked directories are
/// not followed.
pub fn discover_files(root: &Path) -> Result<DiscoveredFiles> {
    if !root.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut discovered = DiscoveredFiles::default();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|e| IngestError::DirectoryRead {
            path: dir.clone(),
            source: e,
        })?;

        for entry_result in entries {
            let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
                path: dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| IngestError::DirectoryRead {
                path: path.clone(),
                source: e,
            })?;

            if file_type.is_dir() {
                pending.push(path);
                continue;
            }

            if !path.is_file() {
                continue;
            }

            match classify(&path) {
                Some(kind) => {
                    trace!(path = %path.display(), %kind, "discovered file");
                    discovered.push(kind, path);
                }
                None => trace!(path = %path.display(), "skipping unsupported file"),
            }
        }
    }

    discovered.tabular.sort();
    discovered.structure.sort();
    discovered.assessment.sort();

    debug!(
        root = %root.display(),
        tabular = discovered.tabular.len(),
        structure = discovered.structure.len(),
        assessment = discovered.assessment.len(),
        "discovery complete"
    );

    Ok(discovered)
}
