//! Transport file parsing.
//!
//! Walks the sections of the first member in order: library header, member
//! and descriptor headers, the NAMESTR block, then the observations.

use std::io::ErrorKind;
use std::path::Path;

use crate::dataset::{XptColumn, XptDataset, XptType, XptValue, XptVersion};
use crate::error::{Result, XptError};
use crate::numeric;
use crate::section::{RECORD_LEN, Section, detect_version};

/// Library, member, descriptor and NAMESTR headers plus their data records.
const MIN_RECORDS: usize = 8;

/// Read and parse a transport file.
pub fn read_xpt(path: &Path) -> Result<XptDataset> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => XptError::NotFound {
            path: path.to_path_buf(),
        },
        _ => XptError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    parse_xpt(&bytes)
}

/// Parse the first member of an in-memory transport file.
pub fn parse_xpt(data: &[u8]) -> Result<XptDataset> {
    if data.len() < RECORD_LEN * MIN_RECORDS {
        return Err(XptError::Layout("file too small"));
    }
    if !data.len().is_multiple_of(RECORD_LEN) {
        return Err(XptError::Layout("file length is not a multiple of 80"));
    }

    let mut records = Records::new(data);

    let library = records.next()?;
    let version = detect_version(library.bytes).ok_or(XptError::UnexpectedSection {
        expected: Section::Library.describe(),
        offset: library.offset,
    })?;
    // Real and modified library records carry only SAS version and dates
    records.next()?;
    records.next()?;

    let member = records.expect(Section::Member, version)?;
    let namestr_len = member.number(74, 4, "NAMESTR length")?;
    if !matches!(namestr_len, 136 | 140) {
        return Err(XptError::BadField {
            field: "NAMESTR length",
            offset: member.offset + 74,
        });
    }
    records.expect(Section::Descriptor, version)?;

    let member_data = records.next()?;
    let name = member_data.text(8, name_width(version));
    if name.is_empty() {
        return Err(XptError::BadField {
            field: "dataset name",
            offset: member_data.offset + 8,
        });
    }
    records.next()?;

    let namestr = records.expect(Section::Namestr, version)?;
    let count_width = match version {
        XptVersion::V5 => 4,
        XptVersion::V8 => 6,
    };
    let count = namestr.number(54, count_width, "variable count")?;
    let block_len = count
        .checked_mul(namestr_len)
        .ok_or(XptError::Layout("variable block too large"))?;
    let columns = records
        .block(block_len)?
        .chunks_exact(namestr_len)
        .enumerate()
        .map(|(index, raw)| parse_variable(raw, index, version))
        .collect::<Result<Vec<_>>>()?;

    if records.peek_is(Section::Labels, version) {
        records.next()?;
        while !records.peek_is(Section::Observations, version) {
            records.next()?;
        }
    }
    records.expect(Section::Observations, version)?;

    let rows = parse_rows(records.rest(), records.offset, &columns)?;

    Ok(XptDataset {
        name,
        version,
        columns,
        rows,
    })
}

fn name_width(version: XptVersion) -> usize {
    match version {
        XptVersion::V5 => 8,
        XptVersion::V8 => 32,
    }
}

/// A record and where it starts in the file.
#[derive(Clone, Copy)]
struct Record<'a> {
    offset: usize,
    bytes: &'a [u8],
}

impl Record<'_> {
    /// Field text without trailing blanks or NULs.
    fn text(&self, start: usize, len: usize) -> String {
        field_text(self.bytes, start, len)
    }

    fn number(&self, start: usize, len: usize, field: &'static str) -> Result<usize> {
        self.text(start, len)
            .trim()
            .parse()
            .map_err(|_| XptError::BadField {
                field,
                offset: self.offset + start,
            })
    }
}

/// Cursor over the 80-byte records of a file.
struct Records<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Records<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn next(&mut self) -> Result<Record<'a>> {
        let offset = self.offset;
        let bytes = self
            .data
            .get(offset..offset + RECORD_LEN)
            .ok_or(XptError::Truncated { offset })?;
        self.offset += RECORD_LEN;
        Ok(Record { offset, bytes })
    }

    fn expect(&mut self, section: Section, version: XptVersion) -> Result<Record<'a>> {
        let record = self.next()?;
        if section.opens(record.bytes, version) {
            Ok(record)
        } else {
            Err(XptError::UnexpectedSection {
                expected: section.describe(),
                offset: record.offset,
            })
        }
    }

    fn peek_is(&self, section: Section, version: XptVersion) -> bool {
        self.data
            .get(self.offset..self.offset + RECORD_LEN)
            .is_some_and(|record| section.opens(record, version))
    }

    /// Take `len` bytes and resume at the next record boundary.
    fn block(&mut self, len: usize) -> Result<&'a [u8]> {
        let start = self.offset;
        let block = self
            .data
            .get(start..start + len)
            .ok_or(XptError::Truncated { offset: start })?;
        self.offset = start + len.div_ceil(RECORD_LEN) * RECORD_LEN;
        Ok(block)
    }

    fn rest(&self) -> &'a [u8] {
        self.data.get(self.offset..).unwrap_or_default()
    }
}

fn field_text(bytes: &[u8], start: usize, len: usize) -> String {
    bytes
        .get(start..start + len)
        .map(|raw| {
            String::from_utf8_lossy(raw)
                .trim_end_matches([' ', '\0'])
                .to_string()
        })
        .unwrap_or_default()
}

/// Parse one NAMESTR entry.
fn parse_variable(raw: &[u8], index: usize, version: XptVersion) -> Result<XptColumn> {
    let bad = |reason: String| XptError::BadVariable { index, reason };
    let word = |at: usize| i16::from_be_bytes([raw[at], raw[at + 1]]);

    let data_type = match word(0) {
        1 => XptType::Num,
        2 => XptType::Char,
        other => return Err(bad(format!("unknown type code {other}"))),
    };
    let length = match u16::try_from(word(4)) {
        Ok(length) if length > 0 => length,
        _ => return Err(bad(format!("invalid length {}", word(4)))),
    };

    let long_name = match version {
        XptVersion::V8 => field_text(raw, 88, 32),
        XptVersion::V5 => String::new(),
    };
    let name = if long_name.is_empty() {
        field_text(raw, 8, 8)
    } else {
        long_name
    };
    if name.trim().is_empty() {
        return Err(bad("empty name".to_string()));
    }

    Ok(XptColumn {
        name,
        data_type,
        length,
    })
}

/// Split the observation area into rows, dropping blank padding at the end.
fn parse_rows(data: &[u8], base: usize, columns: &[XptColumn]) -> Result<Vec<Vec<XptValue>>> {
    let width: usize = columns.iter().map(|column| usize::from(column.length)).sum();
    if width == 0 {
        return Ok(Vec::new());
    }

    let complete = data.len() / width;
    if data[complete * width..].iter().any(|&b| b != b' ') {
        return Err(XptError::Truncated {
            offset: base + complete * width,
        });
    }

    let mut rows: Vec<&[u8]> = data.chunks_exact(width).collect();
    while rows.last().is_some_and(|row| row.iter().all(|&b| b == b' ')) {
        rows.pop();
    }

    Ok(rows
        .into_iter()
        .map(|row| decode_row(row, columns))
        .collect())
}

fn decode_row(row: &[u8], columns: &[XptColumn]) -> Vec<XptValue> {
    let mut start = 0;
    columns
        .iter()
        .map(|column| {
            let cell = &row[start..start + usize::from(column.length)];
            start += cell.len();
            match column.data_type {
                XptType::Char => {
                    XptValue::Char(String::from_utf8_lossy(cell).trim_end().to_string())
                }
                XptType::Num => numeric::decode(cell),
            }
        })
        .collect()
}
