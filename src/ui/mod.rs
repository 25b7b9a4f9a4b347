//! Terminal UI components.
//!
//! Rendering reads the [`Model`](crate::app::Model) and never mutates the
//! dataset:
//! - record and grid layouts of the session
//! - progress gauge, status line and toasts
//! - help, edit prompt, record picker and save error overlays
//! - [`style`]: Theming and colors

pub mod style;

mod images;
mod overlays;
mod render;
mod status;

pub use render::{render, split_record_columns};
pub use status::progress_label;

/// Share of the record layout given to the field table.
pub const RECORD_WIDTH_PERCENT: u16 = 33;
/// Widest a grid column may grow, in terminal cells.
pub const GRID_MAX_COLUMN_WIDTH: usize = 24;
