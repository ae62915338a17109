//! In-memory view of a transport dataset.

use std::fmt;

/// Transport layout version, detected from the library header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XptVersion {
    #[default]
    V5,
    /// Extended layout with 32-character names.
    V8,
}

impl XptVersion {
    /// Identifier used in messages, e.g. `XPORT V8`.
    #[must_use]
    pub fn format_id(self) -> String {
        format!("XPORT {self}")
    }
}

impl fmt::Display for XptVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::V5 => "V5",
            Self::V8 => "V8",
        })
    }
}

/// Storage class of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XptType {
    Num,
    Char,
}

/// SAS missing code: `.`, `._` or `.A`..`.Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingValue {
    Standard,
    Underscore,
    Special(char),
}

impl MissingValue {
    /// Recognise the code byte that leads a missing numeric.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            b'.' => Some(Self::Standard),
            b'_' => Some(Self::Underscore),
            b'A'..=b'Z' => Some(Self::Special(char::from(code))),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Standard => b'.',
            Self::Underscore => b'_',
            Self::Special(letter) => letter.to_ascii_uppercase() as u8,
        }
    }
}

/// One cell of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum XptValue {
    Num(f64),
    Missing(MissingValue),
    Char(String),
}

impl XptValue {
    pub fn numeric(value: f64) -> Self {
        Self::Num(value)
    }

    pub fn numeric_missing() -> Self {
        Self::Missing(MissingValue::Standard)
    }

    pub fn character(value: impl Into<String>) -> Self {
        Self::Char(value.into())
    }

    /// A numeric carrying a missing code, or a blank character value.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Num(_) => false,
            Self::Missing(_) => true,
            Self::Char(text) => text.trim().is_empty(),
        }
    }
}

/// A variable as declared in the NAMESTR block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XptColumn {
    pub name: String,
    pub data_type: XptType,
    /// Bytes the variable occupies in each observation.
    pub length: u16,
}

impl XptColumn {
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: XptType::Num,
            length: 8,
        }
    }

    pub fn character(name: impl Into<String>, length: u16) -> Self {
        Self {
            name: name.into(),
            data_type: XptType::Char,
            length,
        }
    }
}

/// The first member of a transport file.
#[derive(Debug, Clone, PartialEq)]
pub struct XptDataset {
    pub name: String,
    pub version: XptVersion,
    pub columns: Vec<XptColumn>,
    pub rows: Vec<Vec<XptValue>>,
}

impl XptDataset {
    pub fn with_columns(name: impl Into<String>, columns: Vec<XptColumn>) -> Self {
        Self {
            name: name.into(),
            version: XptVersion::V5,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<XptValue>) {
        self.rows.push(row);
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    /// Position of a column, matched case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.name.eq_ignore_ascii_case(name))
    }

    /// Whether any row lacks a value in the column at `index`.
    pub fn has_missing(&self, index: usize) -> bool {
        self.rows
            .iter()
            .any(|row| row.get(index).is_none_or(XptValue::is_missing))
    }
}
