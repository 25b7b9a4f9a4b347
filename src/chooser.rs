//! Startup choosers for the CSV file and the image directory.
//!
//! A native dialog is used when a display is available; otherwise the
//! question is asked on stdin. Both run before the terminal UI starts.

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

/// Ask for the CSV file to review. `None` means nothing was chosen.
///
/// # Errors
///
/// Returns an error when stdin cannot be read in the fallback prompt.
pub fn choose_csv() -> Result<Option<PathBuf>> {
    if display_available() {
        debug!("opening CSV file dialog");
        return Ok(rfd::FileDialog::new()
            .set_title("Select CSV file")
            .add_filter("CSV", &["csv"])
            .add_filter("All Files", &["*"])
            .pick_file());
    }
    Ok(prompt_line("CSV file: ")?.map(PathBuf::from))
}

/// Ask for the directory holding the record images.
///
/// # Errors
///
/// Returns an error when stdin cannot be read in the fallback prompt.
pub fn choose_image_dir() -> Result<Option<PathBuf>> {
    if display_available() {
        debug!("opening image directory dialog");
        return Ok(rfd::FileDialog::new()
            .set_title("Select image directory")
            .pick_folder());
    }
    Ok(prompt_line("Image directory: ")?.map(PathBuf::from))
}

/// Ask for one line on stdin. Empty input and end of input both yield `None`.
///
/// # Errors
///
/// Returns an error when stdout or stdin fails.
pub fn prompt_line(label: &str) -> Result<Option<String>> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{label}")?;
    stdout.flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

/// Whether a native dialog can be shown.
pub fn display_available() -> bool {
    display_available_with(|name| std::env::var_os(name))
}

fn display_available_with(lookup: impl Fn(&str) -> Option<OsString>) -> bool {
    if cfg!(any(target_os = "windows", target_os = "macos")) {
        return true;
    }
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .into_iter()
        .any(|name| lookup(name).is_some_and(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    #[test]
    fn test_display_needs_x11_or_wayland() {
        assert!(!display_available_with(|_| None));
        assert!(!display_available_with(|_| Some(OsString::new())));
        assert!(display_available_with(|name| {
            (name == "WAYLAND_DISPLAY").then(|| OsString::from("wayland-0"))
        }));
        assert!(display_available_with(|name| {
            (name == "DISPLAY").then(|| OsString::from(":0"))
        }));
    }
}
