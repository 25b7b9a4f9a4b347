//! Record store: the ordered table of records behind a review session.
//!
//! A [`Dataset`] is loaded once per session from a source CSV (or from its
//! `_edited.csv` sibling when one already exists) and rewritten in full after
//! every change. The [`labeled`] submodule converts `label: value` text files
//! into a two-column CSV that the store can load like any other source.

mod dataset;
pub mod labeled;
mod persist;

pub use dataset::Dataset;
pub use persist::{LoadOptions, LoadOrigin, Loaded, load, read_csv, save, sibling_path};

use std::path::PathBuf;

use thiserror::Error;

/// Set to `True` the first time a record's value is changed.
pub const EDITED: &str = "edited";
/// Initials of the operator who last changed the record.
pub const EDITOR: &str = "editor";
/// Set to `True` when the record has been shown to the operator.
pub const VIEWED: &str = "viewed";
/// Externally supplied marker for records that need attention.
pub const BAD_VALS: &str = "bad_vals";

/// Fields the operator may never overwrite directly.
pub const PROTECTED_FIELDS: [&str; 2] = [EDITED, EDITOR];

/// Whether `field` is one of the administrative stamps.
pub fn is_protected(field: &str) -> bool {
    PROTECTED_FIELDS.contains(&field)
}

/// Encode a boolean the way sibling files store it.
pub const fn format_flag(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Decode a boolean cell. Anything unrecognised reads as false.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "t" | "y"
    )
}

/// Errors raised while reading or writing a dataset.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{} has no header row", .path.display())]
    MissingHeader { path: PathBuf },
    #[error("{}: column {name:?} appears more than once in the header", .path.display())]
    DuplicateHeader { path: PathBuf, name: String },
    #[error("{}: row {row} has {found} fields but the header has {expected}", .path.display())]
    RaggedRow {
        path: PathBuf,
        row: u64,
        expected: usize,
        found: usize,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
