//! Submission file ingestion.
//!
//! This crate finds the files of a submission and turns raw bytes into
//! the structures the validators inspect.
//!
//! # Features
//!
//! - **Discovery**: recursive walk that classifies files by extension
//! - **Molfile**: SD record splitting and V2000/V3000 connection table parsing
//! - **Encoding**: encoding detection and strict UTF-8 decoding
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use regcheck_ingest::{discover_files, parse_molblock, read_text, split_records};
//!
//! let files = discover_files(Path::new("submission"))?;
//! for path in &files.structure {
//!     let text = read_text(path)?;
//!     for record in split_records(&text) {
//!         let molecule = parse_molblock(record)?;
//!         println!("{}: {} atoms", molecule.name, molecule.atom_count());
//!     }
//! }
//! ```

mod discovery;
mod encoding;
mod error;
pub mod molfile;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{DiscoveredFiles, classify, discover_files};

// === Encoding ===
pub use encoding::{
    UNKNOWN_ENCODING, UTF8_SIG_ENCODING, decode_utf8, detect_encoding, read_bytes, read_text,
};

// === Molfile Parsing ===
pub use molfile::{Molecule, MolfileError, has_property_block, parse_molblock, split_records};
