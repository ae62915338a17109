//! Validation check modules.
//!
//! Each module validates one kind of file and returns a result record. The
//! checks never fail: problems become check statuses and issue strings.

pub mod assessment;
pub mod integrity;
pub mod structure;
pub mod tabular;

use std::path::Path;

/// Name a file is reported under.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_uses_file_name() {
        assert_eq!(display_name(Path::new("m5/datasets/dm.xpt")), "dm.xpt");
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
