//! Reading, writing and first-load derivation of the `_edited.csv` sibling.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{Dataset, EDITED, EDITOR, StoreError, VIEWED, format_flag};

/// Options controlling which administrative columns a load guarantees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Maintain a `viewed` column.
    pub track_viewed: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { track_viewed: true }
    }
}

/// Which file a dataset was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// The raw source; the sibling was derived and written during this load.
    Source,
    /// A sibling left behind by an earlier session.
    Sibling,
}

/// Result of [`load`].
#[derive(Debug, Clone)]
pub struct Loaded {
    pub dataset: Dataset,
    /// Where every subsequent save goes.
    pub sibling: PathBuf,
    pub origin: LoadOrigin,
}

/// `<dir>/<stem>_edited.csv` for a source path.
pub fn sibling_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .or_else(|| source.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{stem}_edited.csv"))
}

/// Load a session dataset, preferring an existing sibling over the source.
///
/// # Errors
///
/// Returns an error when the chosen file cannot be read or parsed, or when a
/// freshly derived sibling cannot be written.
pub fn load(source: &Path, options: &LoadOptions) -> Result<Loaded, StoreError> {
    let sibling = sibling_path(source);

    if sibling.exists() {
        info!(path = %sibling.display(), "using existing edited file");
        let mut dataset = read_csv(&sibling)?;
        let mut added = dataset.ensure_column(EDITED, format_flag(false));
        added |= dataset.ensure_column(EDITOR, "");
        if options.track_viewed {
            added |= dataset.ensure_column(VIEWED, format_flag(false));
        }
        if added {
            debug!(path = %sibling.display(), "added missing administrative columns");
            save(&dataset, &sibling)?;
        }
        return Ok(Loaded {
            dataset,
            sibling,
            origin: LoadOrigin::Sibling,
        });
    }

    info!(
        source = %source.display(),
        sibling = %sibling.display(),
        "no edited file found, deriving one from the source"
    );
    let mut dataset = read_csv(source)?;
    dataset.fill_column(EDITED, format_flag(false));
    dataset.fill_column(EDITOR, "");
    if options.track_viewed {
        dataset.fill_column(VIEWED, format_flag(false));
    }
    save(&dataset, &sibling)?;
    Ok(Loaded {
        dataset,
        sibling,
        origin: LoadOrigin::Source,
    })
}

/// Read a headed CSV into a dataset.
///
/// # Errors
///
/// Fails on I/O errors, invalid UTF-8, an empty file, a header naming the
/// same column twice, or a row whose width differs from the header.
pub fn read_csv(path: &Path) -> Result<Dataset, StoreError> {
    let read_err = |source: csv::Error| match source.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => StoreError::RaggedRow {
            path: path.to_path_buf(),
            row: pos.as_ref().map_or(0, csv::Position::line),
            expected: usize::try_from(*expected_len).unwrap_or(usize::MAX),
            found: usize::try_from(*len).unwrap_or(usize::MAX),
        },
        _ => StoreError::Read {
            path: path.to_path_buf(),
            source,
        },
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(read_err)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(read_err)?
        .iter()
        .map(ToOwned::to_owned)
        .collect();
    if headers.is_empty() {
        return Err(StoreError::MissingHeader {
            path: path.to_path_buf(),
        });
    }
    // Fields are addressed by name, so every name must pick one column.
    if let Some(name) = first_duplicate(&headers) {
        return Err(StoreError::DuplicateHeader {
            path: path.to_path_buf(),
            name: name.to_owned(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        rows.push(record.iter().map(ToOwned::to_owned).collect::<Vec<_>>());
    }
    let expected = headers.len();
    Dataset::from_rows(headers, rows).map_err(|bad| StoreError::RaggedRow {
        path: path.to_path_buf(),
        row: u64::try_from(bad + 2).unwrap_or(u64::MAX),
        expected,
        found: 0,
    })
}

fn first_duplicate(headers: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    headers
        .iter()
        .map(String::as_str)
        .find(|name| !seen.insert(*name))
}

/// Rewrite the whole dataset to `path`.
///
/// # Errors
///
/// Returns [`StoreError::Write`] when the file cannot be created or written;
/// the in-memory dataset is left untouched.
pub fn save(dataset: &Dataset, path: &Path) -> Result<(), StoreError> {
    let write_err = |source: csv::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(write_err)?;
    writer.write_record(dataset.headers()).map_err(write_err)?;
    for row in dataset.rows() {
        writer.write_record(row).map_err(write_err)?;
    }
    writer
        .flush()
        .map_err(|err| write_err(csv::Error::from(err)))?;
    debug!(path = %path.display(), rows = dataset.len(), "saved dataset");
    Ok(())
}
