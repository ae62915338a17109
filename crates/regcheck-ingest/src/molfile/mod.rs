//! MDL molfile and SD file parsing.
//!
//! An SD file is a sequence of molfile records separated by `$$$$` lines.
//! Each record holds a three-line header, a connection table (V2000 fixed
//! columns or V3000 `M  V30` lines) terminated by `M  END`, and optional
//! `> <FIELD>` data items.

mod v2000;
mod v3000;

use thiserror::Error;

/// SD record delimiter.
pub const RECORD_DELIMITER: &str = "$$$$";

/// Connection table dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtabVersion {
    V2000,
    V3000,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub symbol: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Bond between two atoms, by 1-based atom index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub from: usize,
    pub to: usize,
    pub order: u8,
}

/// A parsed molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    pub name: String,
    pub version: CtabVersion,
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
}

impl Molecule {
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }
}

/// Reasons a molfile record cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MolfileError {
    #[error("missing counts line")]
    MissingCountsLine,

    #[error("invalid counts line: {line:?}")]
    InvalidCountsLine { line: String },

    #[error("unsupported connection table version {version:?}")]
    UnsupportedVersion { version: String },

    #[error("expected {expected} atoms, found {found}")]
    TruncatedAtomBlock { expected: usize, found: usize },

    #[error("expected {expected} bonds, found {found}")]
    TruncatedBondBlock { expected: usize, found: usize },

    #[error("invalid atom line {line}")]
    InvalidAtom { line: usize },

    #[error("invalid bond line {line}")]
    InvalidBond { line: usize },

    #[error("bond {bond} references atom {atom} but the molecule has {atoms} atoms")]
    BondOutOfRange {
        bond: usize,
        atom: usize,
        atoms: usize,
    },

    #[error("missing {block} block")]
    MissingBlock { block: &'static str },

    #[error("missing M  END terminator")]
    MissingEnd,
}

/// Split SD file text into molfile records.
///
/// Records are separated by `$$$$`. The line break that ends a delimiter
/// line is not part of the next record, so a record's blank title line is
/// preserved. Records containing only whitespace are dropped.
pub fn split_records(text: &str) -> Vec<&str> {
    text.split(RECORD_DELIMITER)
        .enumerate()
        .map(|(idx, fragment)| {
            let fragment = if idx == 0 {
                fragment
            } else {
                fragment
                    .strip_prefix("\r\n")
                    .or_else(|| fragment.strip_prefix('\n'))
                    .unwrap_or(fragment)
            };
            fragment.trim_end()
        })
        .filter(|record| !record.trim().is_empty())
        .collect()
}

/// Whether a record carries at least one `> <FIELD>` data item.
pub fn has_property_block(record: &str) -> bool {
    record.contains("> ")
}

/// Parse a single molfile record.
pub fn parse_molblock(record: &str) -> Result<Molecule, MolfileError> {
    let lines: Vec<&str> = record.lines().collect();
    let name = lines.first().map(|line| line.trim().to_string()).unwrap_or_default();
    let counts = lines.get(3).ok_or(MolfileError::MissingCountsLine)?;

    match counts_version(counts)? {
        CtabVersion::V2000 => v2000::parse(name, counts, &lines[4..], 4),
        CtabVersion::V3000 => v3000::parse(name, &lines[4..], 4),
    }
}

/// Read the version stamp at the end of the counts line.
///
/// A missing stamp is treated as V2000, as older writers omit it.
fn counts_version(counts: &str) -> Result<CtabVersion, MolfileError> {
    let stamp = counts.get(33..).map(str::trim).unwrap_or("");
    match stamp.to_ascii_uppercase().as_str() {
        "" | "V2000" => Ok(CtabVersion::V2000),
        "V3000" => Ok(CtabVersion::V3000),
        other => Err(MolfileError::UnsupportedVersion {
            version: other.to_string(),
        }),
    }
}

/// Check that every bond references an existing atom.
fn check_bond_range(bonds: &[Bond], atoms: usize) -> Result<(), MolfileError> {
    for (idx, bond) in bonds.iter().enumerate() {
        for atom in [bond.from, bond.to] {
            if atom == 0 || atom > atoms {
                return Err(MolfileError::BondOutOfRange {
                    bond: idx + 1,
                    atom,
                    atoms,
                });
            }
        }
    }
    Ok(())
}

/// Whether a line is the `M  END` terminator.
fn is_end_line(line: &str) -> bool {
    line.trim_end() == "M  END"
}
