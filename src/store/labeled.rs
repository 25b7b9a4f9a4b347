//! Import of `label: value` text reports into a two-column CSV.
//!
//! A participant folder is named after the participant id and holds exactly
//! one text report and one plot image whose file names contain that id. The
//! report is flattened to `Index,Value` rows, labels normalised to `V<digits>`.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::{Dataset, StoreError, save};

/// Header written for imported reports.
pub const IMPORT_HEADERS: [&str; 2] = ["Index", "Value"];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} has no folder name to use as a participant id", .dir.display())]
    NoParticipantId { dir: PathBuf },
    #[error(
        "expected one .txt and one .png containing {id} in {}, found {txt} and {png}",
        .dir.display()
    )]
    Ambiguous {
        dir: PathBuf,
        id: String,
        txt: usize,
        png: usize,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Files produced by [`import_folder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderImport {
    pub id: String,
    /// `<dir>/<id>_dataframe.csv`
    pub csv_path: PathBuf,
    /// The plot shown for every record.
    pub image_path: PathBuf,
}

/// Canonicalise a report label.
///
/// `O` is read as zero, spaces are dropped, and every other non-digit is
/// discarded before prefixing `V`: `"VO 2"` and `"O2 max"` both become `"V02"`.
pub fn normalize_label(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .map(|c| if c == 'O' { '0' } else { c })
        .filter(char::is_ascii_digit)
        .collect();
    format!("V{digits}")
}

/// Parse report lines into ordered `(label, value)` pairs.
///
/// Lines without a colon are skipped. Duplicate labels are kept as separate
/// entries in file order.
pub fn parse_labeled(text: &str) -> Vec<(String, String)> {
    text.lines()
        .map(str::trim)
        .filter_map(|line| line.split_once(':'))
        .map(|(label, value)| (normalize_label(label), value.trim().to_string()))
        .collect()
}

/// Build an `Index,Value` dataset from parsed pairs.
pub fn labeled_dataset(pairs: Vec<(String, String)>) -> Dataset {
    let mut dataset = Dataset::new(IMPORT_HEADERS.iter().map(ToString::to_string).collect());
    for (label, value) in pairs {
        dataset.push_row(vec![label, value]);
    }
    dataset
}

/// Convert a participant folder into `<id>_dataframe.csv`.
///
/// # Errors
///
/// Fails when the folder cannot be listed, does not hold exactly one matching
/// `.txt` and `.png`, or the CSV cannot be written.
pub fn import_folder(dir: &Path) -> Result<FolderImport, ImportError> {
    let id = dir
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ImportError::NoParticipantId {
            dir: dir.to_path_buf(),
        })?;

    let io_err = |source| ImportError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut txt = Vec::new();
    let mut png = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let name = entry.map_err(io_err)?.file_name().to_string_lossy().into_owned();
        if !name.contains(&id) {
            continue;
        }
        if name.ends_with(".txt") {
            txt.push(name);
        } else if name.ends_with(".png") {
            png.push(name);
        }
    }
    let (Some(txt_name), Some(png_name), 1, 1) = (txt.first(), png.first(), txt.len(), png.len())
    else {
        return Err(ImportError::Ambiguous {
            dir: dir.to_path_buf(),
            id,
            txt: txt.len(),
            png: png.len(),
        });
    };

    let txt_path = dir.join(txt_name);
    let text = fs::read_to_string(&txt_path).map_err(|source| ImportError::Io {
        path: txt_path.clone(),
        source,
    })?;
    let dataset = labeled_dataset(parse_labeled(&text));
    let csv_path = dir.join(format!("{id}_dataframe.csv"));
    save(&dataset, &csv_path)?;
    info!(
        report = %txt_path.display(),
        csv = %csv_path.display(),
        rows = dataset.len(),
        "imported labeled report"
    );

    Ok(FolderImport {
        image_path: dir.join(png_name),
        id,
        csv_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::read_csv;
    use tempfile::tempdir;

    #[test]
    fn test_normalize_label_examples() {
        assert_eq!(normalize_label("VO 2"), "V02");
        assert_eq!(normalize_label("O2 max"), "V02");
        assert_eq!(normalize_label("VO2max 1"), "V021");
        assert_eq!(normalize_label("Heart rate"), "V");
    }

    #[test]
    fn test_parse_skips_lines_without_colon() {
        let pairs = parse_labeled("header line\nVO 2: 41.5\n\n  O2 max :  3.2 \n");
        assert_eq!(
            pairs,
            vec![
                ("V02".to_string(), "41.5".to_string()),
                ("V02".to_string(), "3.2".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_splits_on_first_colon_only() {
        let pairs = parse_labeled("V1: 12:30:00");
        assert_eq!(pairs, vec![("V1".to_string(), "12:30:00".to_string())]);
    }

    #[test]
    fn test_import_folder_writes_dataframe_csv() {
        let root = tempdir().unwrap();
        let dir = root.path().join("P017");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("P017_report.txt"), "VO 2: 40\nV 3: 5\n").unwrap();
        std::fs::write(dir.join("P017_plot.png"), b"png").unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let import = import_folder(&dir).unwrap();
        assert_eq!(import.id, "P017");
        assert_eq!(import.image_path, dir.join("P017_plot.png"));
        let dataset = read_csv(&import.csv_path).unwrap();
        assert_eq!(dataset.headers(), IMPORT_HEADERS);
        assert_eq!(dataset.field(0, "Index"), Some("V02"));
        assert_eq!(dataset.field(1, "Value"), Some("5"));
    }

    #[test]
    fn test_import_folder_requires_single_report() {
        let root = tempdir().unwrap();
        let dir = root.path().join("P2");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("P2_a.txt"), "V1: 1").unwrap();
        std::fs::write(dir.join("P2_b.txt"), "V1: 2").unwrap();
        std::fs::write(dir.join("P2.png"), b"png").unwrap();

        let err = import_folder(&dir).unwrap_err();
        assert!(matches!(err, ImportError::Ambiguous { txt: 2, png: 1, .. }));
    }

    #[test]
    fn test_import_folder_without_report_fails() {
        let root = tempdir().unwrap();
        let dir = root.path().join("P3");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("P3.png"), b"png").unwrap();

        let err = import_folder(&dir).unwrap_err();
        assert!(matches!(err, ImportError::Ambiguous { txt: 0, png: 1, .. }));
        assert!(!dir.join("P3_dataframe.csv").exists());
    }

    #[test]
    fn test_import_folder_without_plot_fails() {
        let root = tempdir().unwrap();
        let dir = root.path().join("P4");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("P4_report.txt"), "V1: 1").unwrap();

        let err = import_folder(&dir).unwrap_err();
        assert!(matches!(err, ImportError::Ambiguous { txt: 1, png: 0, .. }));
        assert!(!dir.join("P4_dataframe.csv").exists());
    }
}
