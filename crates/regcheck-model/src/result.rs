//! Per-file check results.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::checks::{
    AssessmentCheck, CheckKind, FileKind, IntegrityCheck, StructureCheck, TabularCheck,
};
use crate::status::{CheckStatus, PassNote, Severity};

/// Read-only view shared by every kind of result record.
pub trait CheckRecord {
    fn file_name(&self) -> &str;

    /// Check labels and statuses in report order.
    fn statuses(&self) -> Vec<(&'static str, CheckStatus)>;

    fn issues(&self) -> &[String];

    /// Whether validation stopped before every check was evaluated.
    fn halted(&self) -> bool;

    /// Worst severity across all checks.
    fn worst(&self) -> Severity {
        self.statuses()
            .into_iter()
            .map(|(_, status)| status.severity())
            .max()
            .unwrap_or(Severity::Pass)
    }
}

/// Statuses and issues of one validator run on one file.
///
/// All checks of `K` start at `PASS`. Statuses only ever move to a more
/// severe value, and every non-pass status is recorded together with an
/// issue string.
#[derive(Debug, Clone, PartialEq)]
pub struct FileChecks<K: CheckKind> {
    file_name: String,
    checks: Vec<(K, CheckStatus)>,
    issues: Vec<String>,
    halted: bool,
}

impl<K: CheckKind> FileChecks<K> {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            checks: K::ALL.iter().map(|&check| (check, CheckStatus::Pass)).collect(),
            issues: Vec::new(),
            halted: false,
        }
    }

    pub fn status(&self, check: K) -> CheckStatus {
        self.checks
            .iter()
            .find(|(candidate, _)| *candidate == check)
            .map(|(_, status)| *status)
            .unwrap_or_default()
    }

    pub fn checks(&self) -> impl Iterator<Item = (K, CheckStatus)> + '_ {
        self.checks.iter().copied()
    }

    /// Downgrade `check` to `status` and record `issue`.
    ///
    /// The issue is always recorded; the status only changes when it is
    /// more severe than the current one.
    pub fn flag(&mut self, check: K, status: CheckStatus, issue: impl Into<String>) {
        debug_assert!(!status.is_pass(), "flag requires a non-pass status");
        self.set(check, status);
        self.issues.push(issue.into());
    }

    /// Qualify a passing check with a note (e.g. `PASS (XML)`).
    pub fn mark_pass(&mut self, check: K, note: PassNote) {
        self.set(check, CheckStatus::PassVariant(note));
    }

    /// Record an advisory issue without touching any status.
    pub fn note(&mut self, issue: impl Into<String>) {
        self.issues.push(issue.into());
    }

    /// Mark that remaining checks were not evaluated.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    fn set(&mut self, check: K, status: CheckStatus) {
        if let Some((_, current)) = self.checks.iter_mut().find(|(c, _)| *c == check)
            && current.accepts(status)
        {
            *current = status;
        }
    }
}

impl<K: CheckKind> CheckRecord for FileChecks<K> {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn statuses(&self) -> Vec<(&'static str, CheckStatus)> {
        self.checks
            .iter()
            .map(|(check, status)| (check.label(), *status))
            .collect()
    }

    fn issues(&self) -> &[String] {
        &self.issues
    }

    fn halted(&self) -> bool {
        self.halted
    }
}

impl<K: CheckKind> Serialize for FileChecks<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FileChecks", 4)?;
        state.serialize_field("file", &self.file_name)?;
        state.serialize_field("checks", &LabelledChecks(&self.checks))?;
        state.serialize_field("issues", &self.issues)?;
        state.serialize_field("halted", &self.halted)?;
        state.end()
    }
}

/// Serializes checks as an ordered `label -> status` map.
struct LabelledChecks<'a, K>(&'a [(K, CheckStatus)]);

impl<K: CheckKind> Serialize for LabelledChecks<'_, K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|(check, status)| (check.label(), status)),
        )
    }
}

/// Integrity checks for one file.
pub type IntegrityResult = FileChecks<IntegrityCheck>;

/// Output of one format validator on one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "validator", rename_all = "lowercase")]
pub enum ValidationResult {
    Tabular(FileChecks<TabularCheck>),
    Structure(FileChecks<StructureCheck>),
    Assessment(FileChecks<AssessmentCheck>),
}

impl ValidationResult {
    pub fn kind(&self) -> FileKind {
        match self {
            ValidationResult::Tabular(_) => FileKind::Tabular,
            ValidationResult::Structure(_) => FileKind::Structure,
            ValidationResult::Assessment(_) => FileKind::Assessment,
        }
    }

    fn record(&self) -> &dyn CheckRecord {
        match self {
            ValidationResult::Tabular(checks) => checks,
            ValidationResult::Structure(checks) => checks,
            ValidationResult::Assessment(checks) => checks,
        }
    }
}

impl CheckRecord for ValidationResult {
    fn file_name(&self) -> &str {
        self.record().file_name()
    }

    fn statuses(&self) -> Vec<(&'static str, CheckStatus)> {
        self.record().statuses()
    }

    fn issues(&self) -> &[String] {
        self.record().issues()
    }

    fn halted(&self) -> bool {
        self.record().halted()
    }
}

impl From<FileChecks<TabularCheck>> for ValidationResult {
    fn from(checks: FileChecks<TabularCheck>) -> Self {
        ValidationResult::Tabular(checks)
    }
}

impl From<FileChecks<StructureCheck>> for ValidationResult {
    fn from(checks: FileChecks<StructureCheck>) -> Self {
        ValidationResult::Structure(checks)
    }
}

impl From<FileChecks<AssessmentCheck>> for ValidationResult {
    fn from(checks: FileChecks<AssessmentCheck>) -> Self {
        ValidationResult::Assessment(checks)
    }
}
