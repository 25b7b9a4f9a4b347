use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use tracing::{error, warn};

use crate::image::{ImageLoader, ImageLookup, ImageSource};
use crate::session::Session;
use crate::store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// How the dataset is laid out on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    /// One record as a Field/Value table beside its image.
    #[default]
    Record,
    /// The whole filtered table with the cursor cell highlighted.
    Grid,
}

impl Layout {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Record => Self::Grid,
            Self::Grid => Self::Record,
        }
    }
}

/// What a submitted prompt will overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptTarget {
    Field(String),
    /// Every editable field of the current record.
    Row,
}

/// Modal single-line input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub target: PromptTarget,
    pub buffer: String,
}

impl Prompt {
    pub fn title(&self) -> String {
        match &self.target {
            PromptTarget::Field(field) => format!("Edit {field}"),
            PromptTarget::Row => "Edit row (comma separated)".to_string(),
        }
    }
}

/// Decoded image for the record on screen.
pub enum CurrentImage {
    Ready {
        path: PathBuf,
        protocol: Box<StatefulProtocol>,
    },
    /// File exists but could not be decoded.
    Failed { path: PathBuf, reason: String },
}

impl CurrentImage {
    fn path(&self) -> &PathBuf {
        match self {
            Self::Ready { path, .. } | Self::Failed { path, .. } => path,
        }
    }
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Dataset, filtered view and cursor
    pub session: Session,
    /// Where record images come from
    pub image_source: ImageSource,
    pub layout: Layout,
    /// Active edit prompt, if any
    pub prompt: Option<Prompt>,
    /// Selected position while the record picker is open
    pub record_picker: Option<usize>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Save failure waiting to be acknowledged
    pub save_error: Option<String>,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Image picker for terminal rendering
    pub picker: Option<Picker>,
    /// Decoded image for the current record
    pub image: Option<CurrentImage>,
    loader: ImageLoader,
    /// Last known terminal size
    pub terminal_size: (u16, u16),
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("sibling", &self.session.sibling_path())
            .field("layout", &self.layout)
            .field("prompt", &self.prompt)
            .field("help_visible", &self.help_visible)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model around an opened session.
    pub fn new(session: Session, image_source: ImageSource, terminal_size: (u16, u16)) -> Self {
        Self {
            session,
            image_source,
            terminal_size,
            ..Self::default()
        }
    }

    /// Set the image picker.
    #[must_use]
    pub fn with_picker(mut self, picker: Option<Picker>) -> Self {
        self.picker = picker;
        self
    }

    /// Image lookup for the record under the cursor.
    pub fn current_lookup(&self) -> Option<ImageLookup> {
        let index = self.session.current_index()?;
        Some(self.image_source.resolve(self.session.dataset(), index))
    }

    /// Decode the current record's image and build its protocol.
    ///
    /// Runs before each draw; does nothing when the image is already prepared.
    pub fn prepare_image(&mut self) {
        let Some(ImageLookup::Found(path)) = self.current_lookup() else {
            self.image = None;
            return;
        };
        if self.image.as_ref().is_some_and(|img| *img.path() == path) {
            return;
        }
        let Some(picker) = &self.picker else {
            self.image = None;
            return;
        };
        self.image = Some(match self.loader.load(&path) {
            Ok(img) => CurrentImage::Ready {
                path,
                protocol: Box::new(picker.new_resize_protocol(img)),
            },
            Err(err) => {
                warn!(path = %path.display(), %err, "image decode failed");
                CurrentImage::Failed {
                    path,
                    reason: err.to_string(),
                }
            }
        });
    }

    /// Surface a failed save; the session keeps its in-memory changes.
    pub(super) fn report_save_error(&mut self, err: &StoreError) {
        error!(%err, "save failed");
        self.save_error = Some(err.to_string());
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    pub const fn record_picker_active(&self) -> bool {
        self.record_picker.is_some()
    }

    /// Labels for the record picker, one per view position.
    pub fn record_labels(&self) -> Vec<String> {
        let dataset = self.session.dataset();
        self.session
            .view()
            .indices()
            .iter()
            .map(|&index| self.image_source.record_label(dataset, index))
            .collect()
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            session: Session::default(),
            image_source: ImageSource::None,
            layout: Layout::Record,
            prompt: None,
            record_picker: None,
            help_visible: false,
            save_error: None,
            config_global_path: None,
            config_local_path: None,
            toast: None,
            should_quit: false,
            picker: None,
            image: None,
            loader: ImageLoader::new(),
            terminal_size: (80, 24),
        }
    }
}
