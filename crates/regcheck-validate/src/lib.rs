//! Validation rule engine for regulatory submission files.
//!
//! Every supported file goes through exactly one format validator and,
//! independently, through the integrity checks. Validators never return
//! errors: anything that goes wrong becomes a check status with an issue.
//! The aggregator folds all results into counts and a compliance verdict.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use regcheck_validate::{ValidationOptions, validate_directory};
//!
//! let run = validate_directory(Path::new("submission"), &ValidationOptions::default())?;
//! println!("{} files, compliance: {}", run.summary.files_validated, run.summary.compliance);
//! ```

mod aggregate;
pub mod checks;
mod options;
pub mod policy;
mod run;
mod util;
pub mod xml;

pub use aggregate::{aggregate, count_statuses};
pub use options::ValidationOptions;
pub use run::{
    ValidationRun, validate_directory, validate_file, validate_files,
    validate_files_with_progress,
};
