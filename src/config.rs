//! Saved default flags.
//!
//! A defaults file holds command-line flags, one per line, with `#`
//! comments. Everything after the flag name is its value, spaces included. The global file is read first, then a local `.qcreviewrc`, then
//! the actual command line; booleans accumulate and options take the last
//! value seen.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub verbose: bool,
    pub show_all: bool,
    pub no_viewed: bool,
    pub grid: bool,
    pub no_images: bool,
    pub force_half_cell: bool,
    pub images: Option<PathBuf>,
    pub image_column: Option<String>,
    pub initials: Option<String>,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            verbose: self.verbose || other.verbose,
            show_all: self.show_all || other.show_all,
            no_viewed: self.no_viewed || other.no_viewed,
            grid: self.grid || other.grid,
            no_images: self.no_images || other.no_images,
            force_half_cell: self.force_half_cell || other.force_half_cell,
            images: other.images.clone().or_else(|| self.images.clone()),
            image_column: other
                .image_column
                .clone()
                .or_else(|| self.image_column.clone()),
            initials: other.initials.clone().or_else(|| self.initials.clone()),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("qcreview").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("qcreview")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("qcreview").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("qcreview")
                .join("config");
        }
    }

    PathBuf::from(".qcreviewrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".qcreviewrc")
}

/// Read flags from a defaults file; a missing file yields no flags.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Split one defaults line into a flag and its (possibly spaced) value.
fn line_tokens(line: &str) -> Vec<String> {
    match line.split_once(char::is_whitespace) {
        Some((name, value)) if !name.contains('=') => {
            vec![name.to_owned(), value.trim().to_owned()]
        }
        _ => vec![line.to_owned()],
    }
}

/// Write `flags` as a defaults file, creating parent directories.
///
/// # Errors
///
/// Returns an error when the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# qcreview defaults (saved with --save)".to_string()];
    let switches = [
        (flags.verbose, "--verbose"),
        (flags.show_all, "--show-all"),
        (flags.no_viewed, "--no-viewed"),
        (flags.grid, "--grid"),
        (flags.no_images, "--no-images"),
        (flags.force_half_cell, "--force-half-cell"),
    ];
    lines.extend(
        switches
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| (*name).to_string()),
    );
    if let Some(dir) = &flags.images {
        lines.push(format!("--images {}", dir.display()));
    }
    if let Some(column) = &flags.image_column {
        lines.push(format!("--image-column {column}"));
    }
    if let Some(initials) = &flags.initials {
        lines.push(format!("--initials {initials}"));
    }
    if let Some(log) = &flags.debug_log {
        lines.push(format!("--debug-log {}", log.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a defaults file if present.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the flags this module understands out of a token list.
///
/// Unknown tokens, including positional arguments, are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value.to_string())),
            _ => (token, None),
        };
        let mut value = || {
            inline.clone().or_else(|| {
                let next = tokens.get(i + 1).cloned();
                if next.is_some() {
                    i += 1;
                }
                next
            })
        };
        match name {
            "-v" | "--verbose" => flags.verbose = true,
            "--show-all" => flags.show_all = true,
            "--no-viewed" => flags.no_viewed = true,
            "--grid" => flags.grid = true,
            "--no-images" => flags.no_images = true,
            "--force-half-cell" => flags.force_half_cell = true,
            "--images" => flags.images = value().map(PathBuf::from),
            "--image-column" => flags.image_column = value(),
            "--initials" => flags.initials = value(),
            "--debug-log" => flags.debug_log = value().map(PathBuf::from),
            _ => {}
        }
        i += 1;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let flags = parse_flag_tokens(&tokens(&[
            "qcreview",
            "--verbose",
            "--grid",
            "--images",
            "plots",
            "--image-column=plot",
            "--initials",
            "JD",
            "--debug-log=debug.log",
            "--force-half-cell",
            "run.csv",
        ]));
        assert!(flags.verbose);
        assert!(flags.grid);
        assert!(!flags.show_all);
        assert_eq!(flags.images, Some(PathBuf::from("plots")));
        assert_eq!(flags.image_column.as_deref(), Some("plot"));
        assert_eq!(flags.initials.as_deref(), Some("JD"));
        assert_eq!(flags.debug_log, Some(PathBuf::from("debug.log")));
        assert!(flags.force_half_cell);
    }

    #[test]
    fn test_short_verbose_is_recognised() {
        let flags = parse_flag_tokens(&tokens(&["qcreview", "-v", "run.csv"]));
        assert!(flags.verbose);
    }

    #[test]
    fn test_saved_values_with_spaces_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".qcreviewrc");
        let flags = ConfigFlags {
            grid: true,
            images: Some(PathBuf::from("/data/My Plots")),
            initials: Some("J D".into()),
            debug_log: Some(PathBuf::from("logs/review run.log")),
            ..ConfigFlags::default()
        };
        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);
    }

    #[test]
    fn test_equals_line_keeps_spaced_value() {
        assert_eq!(
            line_tokens("--debug-log=my file.log"),
            vec!["--debug-log=my file.log".to_string()]
        );
        assert_eq!(line_tokens("--grid"), vec!["--grid".to_string()]);
    }

    #[test]
    fn test_option_without_value_is_ignored() {
        let flags = parse_flag_tokens(&tokens(&["--show-all", "--initials"]));
        assert!(flags.show_all);
        assert_eq!(flags.initials, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            no_viewed: true,
            initials: Some("AB".into()),
            images: Some(PathBuf::from("plots")),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            grid: true,
            initials: Some("JD".into()),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.no_viewed);
        assert!(merged.grid);
        assert_eq!(merged.initials.as_deref(), Some("JD"));
        assert_eq!(merged.images, Some(PathBuf::from("plots")));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(".qcreviewrc");
        let flags = ConfigFlags {
            verbose: true,
            show_all: true,
            no_viewed: true,
            grid: true,
            no_images: true,
            force_half_cell: true,
            images: Some(PathBuf::from("plots")),
            image_column: Some("plot".into()),
            initials: Some("JD".into()),
            debug_log: Some(PathBuf::from("debug.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    }
}
