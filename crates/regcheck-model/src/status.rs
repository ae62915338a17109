//! Check status values and their severity ordering.

use std::fmt;

use serde::{Serialize, Serializer};

/// Severity bucket a [`CheckStatus`] falls into.
///
/// Ordered from least to most severe so that `max` picks the worst outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Pass,
    Warn,
    Fail,
    Error,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Severity; 4] = [
        Severity::Pass,
        Severity::Warn,
        Severity::Fail,
        Severity::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Pass => "PASS",
            Severity::Warn => "WARN",
            Severity::Fail => "FAIL",
            Severity::Error => "ERROR",
        }
    }

    /// Whether this severity breaks overall compliance.
    pub fn is_blocking(self) -> bool {
        matches!(self, Severity::Fail | Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualifier attached to a passing check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PassNote {
    /// Content was parsed as XML markup.
    Xml,
    /// Content was treated as plain ASN.1 text notation.
    Text,
}

impl PassNote {
    pub fn as_str(self) -> &'static str {
        match self {
            PassNote::Xml => "XML",
            PassNote::Text => "Text",
        }
    }
}

/// Outcome of a single named check.
///
/// `Error` means the check itself could not run, which is distinct from a
/// check that ran and failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckStatus {
    #[default]
    Pass,
    PassVariant(PassNote),
    Warn,
    Fail,
    Error,
}

impl CheckStatus {
    pub fn severity(self) -> Severity {
        match self {
            CheckStatus::Pass | CheckStatus::PassVariant(_) => Severity::Pass,
            CheckStatus::Warn => Severity::Warn,
            CheckStatus::Fail => Severity::Fail,
            CheckStatus::Error => Severity::Error,
        }
    }

    pub fn is_pass(self) -> bool {
        self.severity() == Severity::Pass
    }

    /// Whether replacing `self` with `next` keeps the "downgrade only" rule.
    ///
    /// A pass may be qualified with a note, but a noted pass never reverts
    /// to a plain pass and nothing ever moves to a lower severity.
    pub fn accepts(self, next: CheckStatus) -> bool {
        match next.severity().cmp(&self.severity()) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Equal => next != CheckStatus::Pass,
            std::cmp::Ordering::Less => false,
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::PassVariant(note) => write!(f, "PASS ({})", note.as_str()),
            other => f.write_str(other.severity().as_str()),
        }
    }
}

impl Serialize for CheckStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
