//! Aggregate counts and the overall compliance verdict.

use std::fmt;

use serde::Serialize;

use crate::status::Severity;

/// Per-severity check counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pass: usize,
    pub warn: usize,
    pub fail: usize,
    pub error: usize,
}

impl StatusCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Pass => self.pass += 1,
            Severity::Warn => self.warn += 1,
            Severity::Fail => self.fail += 1,
            Severity::Error => self.error += 1,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Pass => self.pass,
            Severity::Warn => self.warn,
            Severity::Fail => self.fail,
            Severity::Error => self.error,
        }
    }

    /// Number of checks counted.
    pub fn total(&self) -> usize {
        self.pass + self.warn + self.fail + self.error
    }

    #[must_use]
    pub fn merged(self, other: StatusCounts) -> StatusCounts {
        StatusCounts {
            pass: self.pass + other.pass,
            warn: self.warn + other.warn,
            fail: self.fail + other.fail,
            error: self.error + other.error,
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.fail == 0 && self.error == 0
    }
}

/// Overall verdict for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Compliance {
    Compliant,
    ReviewRequired,
}

impl Compliance {
    pub fn from_counts(counts: &StatusCounts) -> Self {
        if counts.is_compliant() {
            Compliance::Compliant
        } else {
            Compliance::ReviewRequired
        }
    }
}

impl fmt::Display for Compliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compliance::Compliant => f.write_str("PASS"),
            Compliance::ReviewRequired => f.write_str("REVIEW REQUIRED"),
        }
    }
}

/// Summary derived from every result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    /// Number of format validation results.
    pub files_validated: usize,
    /// Counts over format validator checks only.
    pub validation: StatusCounts,
    /// Counts over integrity checks only.
    pub integrity: StatusCounts,
    /// Counts over every check.
    pub totals: StatusCounts,
    pub compliance: Compliance,
}

impl AggregateReport {
    pub fn new(files_validated: usize, validation: StatusCounts, integrity: StatusCounts) -> Self {
        let totals = validation.merged(integrity);
        Self {
            files_validated,
            validation,
            integrity,
            totals,
            compliance: Compliance::from_counts(&totals),
        }
    }

    /// True iff no check anywhere is `FAIL` or `ERROR`.
    pub fn overall_compliance(&self) -> bool {
        self.compliance == Compliance::Compliant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_total() {
        let mut counts = StatusCounts::default();
        counts.record(Severity::Pass);
        counts.record(Severity::Pass);
        counts.record(Severity::Warn);
        assert_eq!(counts.total(), 3);
        assert!(counts.is_compliant());
        counts.record(Severity::Error);
        assert!(!counts.is_compliant());
    }

    #[test]
    fn test_integrity_failure_breaks_compliance() {
        let validation = StatusCounts {
            pass: 4,
            ..StatusCounts::default()
        };
        let integrity = StatusCounts {
            pass: 2,
            fail: 1,
            ..StatusCounts::default()
        };
        let report = AggregateReport::new(1, validation, integrity);
        assert_eq!(report.totals.total(), 7);
        assert!(!report.overall_compliance());
        assert_eq!(report.compliance.to_string(), "REVIEW REQUIRED");
    }
}
