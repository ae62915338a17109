//! Transport file encoder for building test datasets.
//!
//! Emits the single-member layout `parse_xpt` walks, in the dataset's own
//! version. Enabled by the `fixtures` feature.

use std::path::Path;

use crate::dataset::{MissingValue, XptColumn, XptDataset, XptType, XptValue, XptVersion};
use crate::section::{FRAME_LEAD, FRAME_TRAIL, RECORD_LEN, Section};

const NAMESTR_LEN: usize = 140;
const STAMP: &str = "01JAN24:00:00:00";

/// Encode `dataset` and write it to `path`.
pub fn write_dataset(path: &Path, dataset: &XptDataset) -> std::io::Result<()> {
    std::fs::write(path, encode_dataset(dataset))
}

/// Encode `dataset` as a complete transport file.
pub fn encode_dataset(dataset: &XptDataset) -> Vec<u8> {
    let version = dataset.version;
    let (name_width, count_width) = match version {
        XptVersion::V5 => (8, 4),
        XptVersion::V8 => (32, 6),
    };
    let mut out = Vec::new();

    out.extend(header(Section::Library, version));
    out.extend(record(&[(0, "SAS"), (8, "SAS"), (16, "SASLIB"), (24, "9.4"), (64, STAMP)]));
    out.extend(record(&[(0, STAMP)]));

    let mut member = header(Section::Member, version);
    put(&mut member, 64, 4, "0160");
    put(&mut member, 74, 4, &format!("{NAMESTR_LEN:04}"));
    out.extend(member);
    out.extend(header(Section::Descriptor, version));

    let mut member_data = record(&[(0, "SAS"), (64, STAMP)]);
    put(&mut member_data, 8, name_width, &dataset.name);
    put(&mut member_data, 8 + name_width, 8, "SASDATA");
    out.extend(member_data);
    out.extend(record(&[(0, STAMP)]));

    let mut namestr = header(Section::Namestr, version);
    let count = dataset.columns.len();
    put(&mut namestr, 54, count_width, &format!("{count:0count_width$}"));
    out.extend(namestr);

    let mut position = 0;
    let mut block = Vec::with_capacity(count * NAMESTR_LEN);
    for (index, column) in dataset.columns.iter().enumerate() {
        block.extend(variable(column, index + 1, position, version));
        position += usize::from(column.length);
    }
    extend_padded(&mut out, block);

    out.extend(header(Section::Observations, version));
    let rows = dataset
        .rows
        .iter()
        .flat_map(|row| {
            dataset
                .columns
                .iter()
                .enumerate()
                .flat_map(|(index, column)| cell(column, row.get(index)))
        })
        .collect();
    extend_padded(&mut out, rows);

    out
}

fn header(section: Section, version: XptVersion) -> [u8; RECORD_LEN] {
    let mut record = [b' '; RECORD_LEN];
    record[..20].copy_from_slice(FRAME_LEAD);
    put(&mut record, 20, 8, section.keyword(version));
    record[28..48].copy_from_slice(FRAME_TRAIL);
    record[48..78].fill(b'0');
    record
}

fn record(fields: &[(usize, &str)]) -> [u8; RECORD_LEN] {
    let mut record = [b' '; RECORD_LEN];
    for &(at, text) in fields {
        put(&mut record, at, text.len(), text);
    }
    record
}

/// Copy `text` into `buf[at..at + width]`, truncating to the field.
fn put(buf: &mut [u8], at: usize, width: usize, text: &str) {
    let len = text.len().min(width);
    buf[at..at + len].copy_from_slice(&text.as_bytes()[..len]);
}

fn variable(column: &XptColumn, number: usize, position: usize, version: XptVersion) -> Vec<u8> {
    let mut entry = vec![0u8; NAMESTR_LEN];
    let type_code: i16 = match column.data_type {
        XptType::Num => 1,
        XptType::Char => 2,
    };
    entry[0..2].copy_from_slice(&type_code.to_be_bytes());
    entry[4..6].copy_from_slice(&column.length.to_be_bytes());
    entry[6..8].copy_from_slice(&(number as u16).to_be_bytes());
    // Name, label and format name
    entry[8..64].fill(b' ');
    put(&mut entry, 8, 8, &column.name);
    entry[72..80].fill(b' ');
    entry[84..88].copy_from_slice(&(position as u32).to_be_bytes());
    if version == XptVersion::V8 {
        entry[88..120].fill(b' ');
        put(&mut entry, 88, 32, &column.name);
    }
    entry
}

fn cell(column: &XptColumn, value: Option<&XptValue>) -> Vec<u8> {
    let (mut bytes, fill) = match (column.data_type, value) {
        (XptType::Num, Some(XptValue::Num(number))) => (ibm_bytes(*number).to_vec(), 0),
        (XptType::Num, Some(XptValue::Missing(missing))) => (vec![missing.code()], 0),
        (XptType::Num, _) => (vec![MissingValue::Standard.code()], 0),
        (XptType::Char, Some(XptValue::Char(text))) => (text.as_bytes().to_vec(), b' '),
        (XptType::Char, _) => (Vec::new(), b' '),
    };
    bytes.resize(usize::from(column.length), fill);
    bytes
}

/// Append `bytes` and blank-pad to the next record boundary.
fn extend_padded(out: &mut Vec<u8>, mut bytes: Vec<u8>) {
    bytes.resize(bytes.len().div_ceil(RECORD_LEN) * RECORD_LEN, b' ');
    out.extend(bytes);
}

fn ibm_bytes(value: f64) -> [u8; 8] {
    if !value.is_finite() {
        return [MissingValue::Standard.code(), 0, 0, 0, 0, 0, 0, 0];
    }
    if value == 0.0 {
        return [0; 8];
    }
    let mut magnitude = value.abs();
    let mut exponent = 64i32;
    while magnitude >= 1.0 {
        magnitude /= 16.0;
        exponent += 1;
    }
    while magnitude < 1.0 / 16.0 {
        magnitude *= 16.0;
        exponent -= 1;
    }
    // Below the smallest IBM magnitude
    if exponent < 0 {
        return [0; 8];
    }
    let sign = u64::from(value < 0.0) << 63;
    let fraction = (magnitude * 2f64.powi(56)) as u64;
    (sign | ((exponent as u64) << 56) | fraction).to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::ibm_to_f64;
    use proptest::prelude::*;

    #[test]
    fn test_ibm_encoding() {
        assert_eq!(ibm_bytes(1.0), [0x41, 0x10, 0, 0, 0, 0, 0, 0]);
        assert_eq!(ibm_bytes(-100.0), [0xC2, 0x64, 0, 0, 0, 0, 0, 0]);
        assert_eq!(ibm_bytes(f64::NAN)[0], b'.');
    }

    proptest! {
        #[test]
        fn prop_ibm_encoding_decodes_back(value in -1.0e12f64..1.0e12f64) {
            let back = ibm_to_f64(ibm_bytes(value));
            prop_assert!((back - value).abs() <= value.abs() * 1e-14);
        }
    }

    #[test]
    fn test_layout_is_record_aligned() {
        let mut dataset = XptDataset::with_columns("DM", vec![XptColumn::character("USUBJID", 11)]);
        dataset.add_row(vec![XptValue::character("STUDY01-001")]);
        let bytes = encode_dataset(&dataset);

        // Eight leading records, two NAMESTR records, OBS header, one data record
        assert_eq!(bytes.len(), RECORD_LEN * 12);
        assert!(bytes.starts_with(b"HEADER RECORD*******LIBRARY HEADER RECORD!!!!!!!"));
        assert_eq!(&bytes[RECORD_LEN * 11..RECORD_LEN * 11 + 11], b"STUDY01-001");
    }
}
