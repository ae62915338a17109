//! SAS Transport (XPT) dataset reader.
//!
//! Parses the first member of a V5 or V8 transport file into an
//! [`XptDataset`]: variable definitions from the NAMESTR block and decoded
//! observations, with SAS missing codes kept distinct from values. The
//! version is detected from the library header.
//!
//! ```no_run
//! use std::path::Path;
//! use regcheck_xpt::read_xpt;
//!
//! let dataset = read_xpt(Path::new("dm.xpt")).unwrap();
//! println!("{}: {} rows, {}", dataset.name, dataset.num_rows(), dataset.version.format_id());
//! ```
//!
//! The `fixtures` feature adds [`fixture`], an encoder for building
//! transport files in tests.

mod dataset;
mod error;
mod numeric;
mod parse;
mod section;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixture;

pub use dataset::{MissingValue, XptColumn, XptDataset, XptType, XptValue, XptVersion};
pub use error::{Result, XptError};
pub use parse::{parse_xpt, read_xpt};
pub use section::RECORD_LEN;
