//! Fixed check sets for each validator kind.
//!
//! Every validator owns a closed enum of checks so that the set of check
//! names is known at compile time and shared by validators, the aggregator
//! and the report writers.

use std::fmt;

/// A closed set of named checks belonging to one validator.
pub trait CheckKind: Copy + Eq + fmt::Debug + 'static {
    /// Every check in report order.
    const ALL: &'static [Self];

    /// Human-readable check name used in reports and exports.
    fn label(self) -> &'static str;
}

/// Checks run on SAS Transport (XPT) datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabularCheck {
    FormatCheck,
    CdiscCompliance,
    RequiredVariables,
    DataIntegrity,
}

impl CheckKind for TabularCheck {
    const ALL: &'static [Self] = &[
        TabularCheck::FormatCheck,
        TabularCheck::CdiscCompliance,
        TabularCheck::RequiredVariables,
        TabularCheck::DataIntegrity,
    ];

    fn label(self) -> &'static str {
        match self {
            TabularCheck::FormatCheck => "Format Check",
            TabularCheck::CdiscCompliance => "CDISC Compliance",
            TabularCheck::RequiredVariables => "Required Variables",
            TabularCheck::DataIntegrity => "Data Integrity",
        }
    }
}

/// Checks run on SD (structure-data) molecule files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureCheck {
    StructureCheck,
    MoleculeCount,
    PropertyBlocks,
    Connectivity,
}

impl CheckKind for StructureCheck {
    const ALL: &'static [Self] = &[
        StructureCheck::StructureCheck,
        StructureCheck::MoleculeCount,
        StructureCheck::PropertyBlocks,
        StructureCheck::Connectivity,
    ];

    fn label(self) -> &'static str {
        match self {
            StructureCheck::StructureCheck => "Structure Check",
            StructureCheck::MoleculeCount => "Molecule Count",
            StructureCheck::PropertyBlocks => "Property Blocks",
            StructureCheck::Connectivity => "Connectivity",
        }
    }
}

/// Checks run on assessment (`.asnt`) files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssessmentCheck {
    Asn1Structure,
    Encoding,
    SchemaCompliance,
    MandatoryFields,
}

impl CheckKind for AssessmentCheck {
    const ALL: &'static [Self] = &[
        AssessmentCheck::Asn1Structure,
        AssessmentCheck::Encoding,
        AssessmentCheck::SchemaCompliance,
        AssessmentCheck::MandatoryFields,
    ];

    fn label(self) -> &'static str {
        match self {
            AssessmentCheck::Asn1Structure => "ASN.1 Structure",
            AssessmentCheck::Encoding => "Encoding",
            AssessmentCheck::SchemaCompliance => "Schema Compliance",
            AssessmentCheck::MandatoryFields => "Mandatory Fields",
        }
    }
}

/// Format-agnostic file integrity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegrityCheck {
    FileSize,
    FileExists,
    Readable,
}

impl CheckKind for IntegrityCheck {
    const ALL: &'static [Self] = &[
        IntegrityCheck::FileSize,
        IntegrityCheck::FileExists,
        IntegrityCheck::Readable,
    ];

    fn label(self) -> &'static str {
        match self {
            IntegrityCheck::FileSize => "File Size",
            IntegrityCheck::FileExists => "File Exists",
            IntegrityCheck::Readable => "Readable",
        }
    }
}

/// Submission file category, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// SAS Transport dataset (`.xpt`).
    Tabular,
    /// SD molecule file (`.sdf`).
    Structure,
    /// Assessment file (`.asnt`).
    Assessment,
}

impl FileKind {
    /// All kinds in dispatch order.
    pub const ALL: [FileKind; 3] = [FileKind::Tabular, FileKind::Structure, FileKind::Assessment];

    /// Classify a file extension (without the dot, any case).
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| ext.eq_ignore_ascii_case(kind.extension()))
    }

    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Tabular => "xpt",
            FileKind::Structure => "sdf",
            FileKind::Assessment => "asnt",
        }
    }

    /// Short name shown in reports.
    pub fn label(self) -> &'static str {
        match self {
            FileKind::Tabular => "XPT",
            FileKind::Structure => "SDF",
            FileKind::Assessment => "ASNT",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FileKind::Tabular => "SAS Transport clinical dataset",
            FileKind::Structure => "Structure-data molecule file",
            FileKind::Assessment => "Assessment file (XML or ASN.1 text)",
        }
    }

    /// Check labels run by the validator for this kind.
    pub fn check_labels(self) -> Vec<&'static str> {
        match self {
            FileKind::Tabular => labels::<TabularCheck>(),
            FileKind::Structure => labels::<StructureCheck>(),
            FileKind::Assessment => labels::<AssessmentCheck>(),
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Labels of every check in a kind, in report order.
pub fn labels<K: CheckKind>() -> Vec<&'static str> {
    K::ALL.iter().map(|check| check.label()).collect()
}
