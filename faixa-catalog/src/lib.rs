//! Price-list and catalog data model, text normalization, and row rules.
//!
//! This crate defines the data model shared by the importer and the
//! persistence layer without any I/O of its own. Everything here is a pure
//! function of its inputs, so the same spreadsheet and asset tree always
//! produce the same keys, handles, and image ids.

pub mod model_year;
pub mod row_class;
pub mod text;
pub mod types;

pub use model_year::{ModelYear, normalize_model};
pub use row_class::{HeaderRules, RowKind, classify};
pub use text::{image_id, normalize, slugify, tokens};
pub use types::*;
