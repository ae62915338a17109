//! SAS Transport dataset checks.
//!
//! - Format: the file must be a V5 transport file
//! - Required variables: `STUDYID` and `USUBJID` must be columns
//! - Data integrity: required variables and `--SEQ` keys must be populated

use std::path::Path;

use regcheck_model::{CheckStatus, FileChecks, TabularCheck};
use regcheck_xpt::{XptDataset, read_xpt};
use tracing::debug;

use super::display_name;
use crate::policy::{EXPECTED_XPT_VERSION, REQUIRED_VARIABLES, SEQUENCE_MARKER};
use crate::util::CaseInsensitiveSet;

/// Validate a transport dataset file.
pub fn check(path: &Path) -> FileChecks<TabularCheck> {
    let mut result = FileChecks::new(display_name(path));

    let dataset = match read_xpt(path) {
        Ok(dataset) => dataset,
        Err(err) => {
            result.flag(
                TabularCheck::FormatCheck,
                CheckStatus::Error,
                format!("Error reading file: {err}"),
            );
            result.halt();
            return result;
        }
    };

    debug!(
        file = %path.display(),
        dataset = %dataset.name,
        version = %dataset.version,
        columns = dataset.columns.len(),
        rows = dataset.num_rows(),
        "read transport dataset"
    );

    check_dataset(&dataset, &mut result);
    result
}

/// Run the content checks on an already parsed dataset.
pub fn check_dataset(dataset: &XptDataset, result: &mut FileChecks<TabularCheck>) {
    if dataset.version != EXPECTED_XPT_VERSION {
        result.flag(
            TabularCheck::FormatCheck,
            CheckStatus::Fail,
            format!("Not XPORT V5 format: {}", dataset.version.format_id()),
        );
    }

    let columns = CaseInsensitiveSet::from_iter(dataset.column_names());

    let missing: Vec<&str> = REQUIRED_VARIABLES
        .into_iter()
        .filter(|name| !columns.contains(name))
        .collect();
    if !missing.is_empty() {
        result.flag(
            TabularCheck::RequiredVariables,
            CheckStatus::Fail,
            format!("Missing required variables: {}", missing.join(", ")),
        );
    }

    let null_required = REQUIRED_VARIABLES.into_iter().find(|name| {
        dataset
            .column_index(name)
            .is_some_and(|idx| dataset.has_missing(idx))
    });
    if let Some(name) = null_required {
        result.flag(
            TabularCheck::DataIntegrity,
            CheckStatus::Fail,
            format!("Null values in {name}"),
        );
    }

    let null_sequence = dataset.columns.iter().enumerate().find(|(idx, column)| {
        column.name.to_uppercase().contains(SEQUENCE_MARKER) && dataset.has_missing(*idx)
    });
    if let Some((_, column)) = null_sequence {
        result.flag(
            TabularCheck::DataIntegrity,
            CheckStatus::Fail,
            format!("Null values in {}", column.name),
        );
    }
}
