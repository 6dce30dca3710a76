//! Core library for the gstr2tally command line application.
//!
//! The library exposes high-level orchestration helpers that power the
//! command-line interface as well as the tests. The modules are structured
//! to keep responsibilities narrow and composable: workbook and XML adapters
//! live under [`io`], data representations inside [`model`], cell
//! canonicalization in [`normalize`], duplicate suppression in [`dedup`],
//! voucher synthesis in [`voucher`], document assembly in [`masters`] and
//! [`document`], and run orchestration under [`convert`].

pub mod convert;
pub mod dedup;
pub mod document;
pub mod error;
pub mod io;
pub mod layout;
pub mod masters;
pub mod model;
pub mod normalize;
pub mod voucher;

pub use convert::{Conversion, ConvertOptions, RunSummary, convert_to_file, convert_workbooks};
pub use error::{ConvertError, Result};
