//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: State transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod screen;
mod update;

pub use model::{CurrentImage, Layout, Model, Prompt, PromptTarget, ToastLevel};
pub use screen::{ScreenAwareWriter, screen_active, stderr_log_writer};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::image::ImageSource;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    image_source: ImageSource,
    images_enabled: bool,
    force_half_cell: bool,
    layout: Layout,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application drawing images from `image_source`.
    pub const fn new(image_source: ImageSource) -> Self {
        Self {
            image_source,
            images_enabled: true,
            force_half_cell: false,
            layout: Layout::Record,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Enable or disable image rendering.
    #[must_use]
    pub fn with_images_enabled(mut self, enabled: bool) -> Self {
        self.images_enabled = enabled;
        if !enabled {
            self.image_source = ImageSource::None;
        }
        self
    }

    /// Use half-block rendering instead of probing the terminal.
    #[must_use]
    pub const fn with_force_half_cell(mut self, force: bool) -> Self {
        self.force_half_cell = force;
        self
    }

    /// Start in the grid layout instead of the record layout.
    #[must_use]
    pub const fn with_grid_layout(mut self, grid: bool) -> Self {
        self.layout = if grid { Layout::Grid } else { Layout::Record };
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
