//! Result aggregation.
//!
//! Counting is a pure fold over check statuses, so the summary does not
//! depend on the order of results and repeated calls give the same answer.

use regcheck_model::{AggregateReport, CheckRecord, IntegrityResult, StatusCounts, ValidationResult};

/// Count the statuses of every check in `records`.
pub fn count_statuses<'a, R, I>(records: I) -> StatusCounts
where
    R: CheckRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .flat_map(CheckRecord::statuses)
        .fold(StatusCounts::default(), |mut counts, (_, status)| {
            counts.record(status.severity());
            counts
        })
}

/// Summarise a run's validation and integrity results.
pub fn aggregate(validation: &[ValidationResult], integrity: &[IntegrityResult]) -> AggregateReport {
    AggregateReport::new(
        validation.len(),
        count_statuses(validation),
        count_statuses(integrity),
    )
}
