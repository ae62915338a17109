//! Section header records.
//!
//! Every section of a transport file opens with an 80-byte record framed as
//! `HEADER RECORD*******<keyword>HEADER RECORD!!!!!!!` followed by digits.
//! The keyword names the section and, for V8 files, carries the version.

use crate::dataset::XptVersion;

/// Width of every record in a transport file.
pub const RECORD_LEN: usize = 80;

pub(crate) const FRAME_LEAD: &[u8; 20] = b"HEADER RECORD*******";
pub(crate) const FRAME_TRAIL: &[u8; 20] = b"HEADER RECORD!!!!!!!";
const KEYWORD: std::ops::Range<usize> = 20..28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Library,
    Member,
    Descriptor,
    Namestr,
    Observations,
    /// Optional V8 block of long labels, between NAMESTR and OBS.
    Labels,
}

impl Section {
    pub fn keyword(self, version: XptVersion) -> &'static str {
        match (self, version) {
            (Self::Library, XptVersion::V5) => "LIBRARY",
            (Self::Library, XptVersion::V8) => "LIBV8",
            (Self::Member, XptVersion::V5) => "MEMBER",
            (Self::Member, XptVersion::V8) => "MEMBV8",
            (Self::Descriptor, XptVersion::V5) => "DSCRPTR",
            (Self::Descriptor, XptVersion::V8) => "DSCPTV8",
            (Self::Namestr, XptVersion::V5) => "NAMESTR",
            (Self::Namestr, XptVersion::V8) => "NAMSTV8",
            (Self::Observations, XptVersion::V5) => "OBS",
            (Self::Observations, XptVersion::V8) => "OBSV8",
            (Self::Labels, _) => "LABELV8",
        }
    }

    /// Section name used in error messages.
    pub fn describe(self) -> &'static str {
        self.keyword(XptVersion::V5)
    }

    /// Whether `record` opens this section in a file of `version`.
    pub fn opens(self, record: &[u8], version: XptVersion) -> bool {
        match (self, keyword(record)) {
            (Self::Labels, Some(found)) => matches!(found, "LABELV8" | "LABELV9"),
            (_, Some(found)) => found == self.keyword(version),
            (_, None) => false,
        }
    }
}

/// Keyword of a header record, or `None` when the frame is missing.
pub fn keyword(record: &[u8]) -> Option<&str> {
    let framed = record.len() >= 48
        && record.starts_with(FRAME_LEAD)
        && &record[28..48] == FRAME_TRAIL;
    if !framed {
        return None;
    }
    std::str::from_utf8(&record[KEYWORD])
        .ok()
        .map(str::trim_end)
}

/// Version announced by a library header record.
pub fn detect_version(record: &[u8]) -> Option<XptVersion> {
    [XptVersion::V5, XptVersion::V8]
        .into_iter()
        .find(|&version| Section::Library.opens(record, version))
}
