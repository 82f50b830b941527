//! SPSS system file (.sav) reader and writer.
//!
//! This crate reads and writes the uncompressed little-endian subset of the
//! SPSS system-file format: a header record, a variable dictionary with
//! optional variable and value labels, and a fixed-width case grid of 8-byte
//! elements. Compressed or byte-swapped files are rejected.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use savcheck_sav::{SavColumn, SavDataset, SavValue, read_sav, write_sav};
//!
//! // Read a .sav file
//! let dataset = read_sav(Path::new("survey.sav")).unwrap();
//! println!("{} variables, {} cases", dataset.columns.len(), dataset.num_rows());
//!
//! // Create a new dataset
//! let mut ds = SavDataset::with_columns(vec![
//!     SavColumn::numeric("SBJNUM").with_label("Subject number"),
//!     SavColumn::text("NOME", 24),
//! ]);
//! ds.add_row(vec![SavValue::number(101.0), SavValue::text("ANA")]);
//!
//! write_sav(Path::new("survey_out.sav"), &ds).unwrap();
//! ```

mod error;
pub mod header;
mod reader;
mod types;
mod writer;

pub use error::{Result, SavError};
pub use types::{SavColumn, SavDataset, SavValue, SavVarType};

pub use reader::{SavReader, read_sav};
pub use writer::{SavWriter, write_sav};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
