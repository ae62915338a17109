//! Result model shared by the regcheck validators, aggregator and reports.

pub mod checks;
pub mod result;
pub mod status;
pub mod summary;

pub use checks::{
    AssessmentCheck, CheckKind, FileKind, IntegrityCheck, StructureCheck, TabularCheck, labels,
};
pub use result::{CheckRecord, FileChecks, IntegrityResult, ValidationResult};
pub use status::{CheckStatus, PassNote, Severity};
pub use summary::{AggregateReport, Compliance, StatusCounts};
