//! Associated images: where a record's image lives and how it is drawn.
//!
//! Lookup is pure path arithmetic over the dataset. Decoding goes through
//! the `image` crate behind a small cache, and terminal rendering uses a
//! `ratatui-image` picker chosen once at startup.

mod loader;

pub use loader::{ImageCache, ImageLoader};

use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui_image::picker::Picker;
#[cfg(unix)]
use ratatui_image::picker::cap_parser::QueryStdioOptions;

use crate::store::Dataset;

const PICKER_QUERY_TIMEOUT_MS: u64 = 250;

/// Column holding image file names unless configured otherwise.
pub const DEFAULT_IMAGE_COLUMN: &str = "img_name";

/// Where the image for a record comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// File named by `column`, resolved against `dir`.
    Column { dir: PathBuf, column: String },
    /// One image shown for every record.
    Fixed(PathBuf),
    /// No images for this session.
    None,
}

/// Result of resolving a record's image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLookup {
    Found(PathBuf),
    /// Expected file does not exist.
    Missing(PathBuf),
    /// The dataset has no image column, or the cell is empty.
    NoColumn,
    Disabled,
}

impl ImageLookup {
    /// Placeholder text shown instead of an image.
    pub fn placeholder(&self) -> Option<String> {
        match self {
            Self::Found(_) => None,
            Self::Missing(path) => Some(format!("Image not found\n{}", path.display())),
            Self::NoColumn => Some("No image column".to_string()),
            Self::Disabled => Some("Images disabled".to_string()),
        }
    }
}

impl ImageSource {
    /// Image path for dataset row `index`.
    pub fn resolve(&self, dataset: &Dataset, index: usize) -> ImageLookup {
        let path = match self {
            Self::None => return ImageLookup::Disabled,
            Self::Fixed(path) => path.clone(),
            Self::Column { dir, column } => {
                match dataset.field(index, column).map(str::trim) {
                    Some(name) if !name.is_empty() => resolve_path(dir, name),
                    _ => return ImageLookup::NoColumn,
                }
            }
        };
        if path.is_file() {
            ImageLookup::Found(path)
        } else {
            ImageLookup::Missing(path)
        }
    }

    /// Label used when picking a record from a list.
    pub fn record_label(&self, dataset: &Dataset, index: usize) -> String {
        match self {
            Self::Column { column, .. } => dataset
                .field(index, column)
                .filter(|name| !name.trim().is_empty())
                .map_or_else(|| format!("record {}", index + 1), ToOwned::to_owned),
            Self::Fixed(_) | Self::None => dataset
                .value(index, 0)
                .map_or_else(|| format!("record {}", index + 1), ToOwned::to_owned),
        }
    }
}

/// Join a possibly relative image name onto a directory.
pub fn resolve_path(dir: &Path, name: &str) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}

/// Create a picker for terminal image rendering.
///
/// The picker detects terminal capabilities and chooses the best protocol.
pub fn create_picker(force_half_cell: bool) -> Option<Picker> {
    if force_half_cell {
        tracing::debug!("forcing half-block image rendering");
        return Some(Picker::halfblocks());
    }

    // The stdio capability query can leave an orphaned reader on the Windows
    // console input buffer.
    #[cfg(not(unix))]
    {
        return Some(Picker::halfblocks());
    }

    #[cfg(unix)]
    {
        let picker = Picker::from_query_stdio_with_options(query_options()).ok()?;
        tracing::debug!(
            term = %std::env::var("TERM").unwrap_or_else(|_| "<unset>".to_string()),
            protocol = ?picker.protocol_type(),
            "image picker created"
        );
        Some(picker)
    }
}

#[cfg(unix)]
fn query_options() -> QueryStdioOptions {
    let mut options = QueryStdioOptions::default();
    options.timeout = Duration::from_millis(PICKER_QUERY_TIMEOUT_MS);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn dataset() -> Dataset {
        Dataset::from_rows(
            vec!["id".into(), "img_name".into()],
            vec![
                vec!["1".into(), "a.png".into()],
                vec!["2".into(), String::new()],
            ],
        )
        .unwrap()
    }

    #[cfg(unix)]
    #[test]
    fn test_picker_query_timeout_is_fast() {
        let options = query_options();
        assert_eq!(options.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_column_source_finds_existing_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"x").unwrap();
        let source = ImageSource::Column {
            dir: dir.path().to_path_buf(),
            column: DEFAULT_IMAGE_COLUMN.into(),
        };
        assert_eq!(
            source.resolve(&dataset(), 0),
            ImageLookup::Found(dir.path().join("a.png"))
        );
        assert_eq!(source.resolve(&dataset(), 1), ImageLookup::NoColumn);
    }

    #[test]
    fn test_missing_file_is_placeholder_not_error() {
        let dir = tempdir().unwrap();
        let source = ImageSource::Column {
            dir: dir.path().to_path_buf(),
            column: DEFAULT_IMAGE_COLUMN.into(),
        };
        let lookup = source.resolve(&dataset(), 0);
        assert!(matches!(lookup, ImageLookup::Missing(_)));
        assert!(lookup.placeholder().unwrap().starts_with("Image not found"));
    }

    #[test]
    fn test_unknown_column_reports_no_column() {
        let source = ImageSource::Column {
            dir: PathBuf::from("/tmp"),
            column: "plot".into(),
        };
        assert_eq!(source.resolve(&dataset(), 0), ImageLookup::NoColumn);
    }

    #[test]
    fn test_resolve_path_keeps_absolute() {
        assert_eq!(
            resolve_path(Path::new("/base"), "/abs/x.png"),
            PathBuf::from("/abs/x.png")
        );
        assert_eq!(
            resolve_path(Path::new("/base"), "rel/x.png"),
            PathBuf::from("/base/rel/x.png")
        );
    }

    #[test]
    fn test_record_label_falls_back_to_position() {
        let source = ImageSource::Column {
            dir: PathBuf::from("."),
            column: DEFAULT_IMAGE_COLUMN.into(),
        };
        assert_eq!(source.record_label(&dataset(), 0), "a.png");
        assert_eq!(source.record_label(&dataset(), 1), "record 2");
        assert_eq!(ImageSource::None.record_label(&dataset(), 1), "2");
    }
}
