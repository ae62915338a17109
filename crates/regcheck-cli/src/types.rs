use std::path::PathBuf;

use regcheck_validate::ValidationRun;

/// Outcome of `regcheck validate`.
#[derive(Debug)]
pub struct ValidateOutcome {
    pub root: PathBuf,
    /// `None` for a dry run.
    pub output_dir: Option<PathBuf>,
    pub reports: Vec<PathBuf>,
    pub run: ValidationRun,
}

impl ValidateOutcome {
    pub fn is_compliant(&self) -> bool {
        self.run.summary.overall_compliance()
    }

    /// Process exit code: 0 when compliant, 1 when review is required.
    pub fn exit_code(&self) -> i32 {
        if self.is_compliant() { 0 } else { 1 }
    }
}
