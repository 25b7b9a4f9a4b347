//! qcreview - step through measurement records and their images in the
//! terminal, marking what was reviewed and correcting values as you go.
//!
//! # Usage
//!
//! ```bash
//! qcreview run.csv --images plots/ --initials JD
//! qcreview --show-all --grid run.csv --no-images
//! qcreview --folder participant_042/
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use qcreview::app::{App, stderr_log_writer};
use qcreview::chooser::{choose_csv, choose_image_dir, prompt_line};
use qcreview::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use qcreview::image::{DEFAULT_IMAGE_COLUMN, ImageSource};
use qcreview::session::{Session, SessionOptions};
use qcreview::store::labeled::import_folder;

/// Review tabular measurement data record by record, with images
#[derive(Parser, Debug)]
#[command(name = "qcreview", version, about, long_about = None)]
struct Cli {
    /// CSV file to review (chosen in a dialog when omitted)
    #[arg(value_name = "FILE", conflicts_with = "folder")]
    file: Option<PathBuf>,

    /// Import a participant folder holding one labeled .txt and one .png
    #[arg(long, value_name = "DIR")]
    folder: Option<PathBuf>,

    /// Directory holding the record images (chosen in a dialog when omitted)
    #[arg(long, value_name = "DIR")]
    images: Option<PathBuf>,

    /// Column naming each record's image file
    #[arg(long, value_name = "NAME")]
    image_column: Option<String>,

    /// Do not show images (placeholders only)
    #[arg(long)]
    no_images: bool,

    /// Force image rendering to use half-cell fallback mode
    #[arg(long)]
    force_half_cell: bool,

    /// Review every unviewed record even when the file has a bad_vals column
    #[arg(short, long)]
    verbose: bool,

    /// Review every record, viewed or not
    #[arg(long)]
    show_all: bool,

    /// Do not track or record which records were viewed
    #[arg(long)]
    no_viewed: bool,

    /// Start in the grid layout
    #[arg(long)]
    grid: bool,

    /// Initials stamped on every edit (asked for on stdin when omitted)
    #[arg(long, value_name = "XX")]
    initials: Option<String>,

    /// Write debug logs to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(debug_log: Option<&Path>) -> Result<()> {
    let Some(path) = debug_log else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
            )
            .with_writer(stderr_log_writer)
            .init();
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create debug log {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// The CSV to open and where its images come from.
fn resolve_input(cli: &Cli, effective: &ConfigFlags) -> Result<(PathBuf, ImageSource)> {
    if let Some(folder) = &cli.folder {
        let import = import_folder(folder)
            .with_context(|| format!("Failed to import folder {}", folder.display()))?;
        info!(id = %import.id, csv = %import.csv_path.display(), "folder imported");
        let source = if effective.no_images {
            ImageSource::None
        } else {
            ImageSource::Fixed(import.image_path)
        };
        return Ok((import.csv_path, source));
    }

    let file = match &cli.file {
        Some(file) => file.clone(),
        None => match choose_csv()? {
            Some(file) => file,
            None => bail!("No CSV file selected"),
        },
    };
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }

    if effective.no_images {
        return Ok((file, ImageSource::None));
    }
    let dir = match &effective.images {
        Some(dir) => dir.clone(),
        None => match choose_image_dir()? {
            Some(dir) => dir,
            None => bail!("No image directory selected"),
        },
    };
    let column = effective
        .image_column
        .clone()
        .unwrap_or_else(|| DEFAULT_IMAGE_COLUMN.to_string());
    Ok((file, ImageSource::Column { dir, column }))
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.debug_log.as_deref())?;

    let (source, image_source) = resolve_input(&cli, &effective)?;
    let initials = match &effective.initials {
        Some(initials) => initials.clone(),
        None => prompt_line("Initials (optional): ")?.unwrap_or_default(),
    };

    let options = SessionOptions {
        track_viewed: !effective.no_viewed,
        show_all: effective.show_all,
        verbose: effective.verbose,
        initials,
    };
    let session = Session::open(&source, options)
        .with_context(|| format!("Failed to load {}", source.display()))?;

    let mut app = App::new(image_source)
        .with_images_enabled(!effective.no_images)
        .with_force_half_cell(effective.force_half_cell)
        .with_grid_layout(effective.grid)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run(session).context("Application error")
}
