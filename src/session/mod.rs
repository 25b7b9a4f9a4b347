//! Review session state.
//!
//! [`Session`] is the value object the UI drives: it owns the dataset, the
//! filtered view computed at load, the cursor walking that view, and the
//! operator's initials. Every method that changes the dataset persists the
//! whole table before returning; a failed save is reported to the caller while
//! the in-memory state stays authoritative.

pub mod cursor;
pub mod edit;
pub mod filter;

pub use cursor::{Cursor, Direction};
pub use edit::{EditOutcome, edit_field, edit_row, editable_fields, row_prompt_text};
pub use filter::{FilterMode, FilteredView, compute_filtered_indices};

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::store::{self, BAD_VALS, Dataset, LoadOptions, LoadOrigin, Loaded, StoreError, VIEWED};

/// Startup choices for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Maintain the `viewed` column and mark records as they are shown.
    pub track_viewed: bool,
    /// Navigate every record regardless of `viewed`.
    pub show_all: bool,
    /// Do not narrow a `bad_vals` dataset to flagged records.
    pub verbose: bool,
    /// Stamped into `editor` on every edit. May be empty.
    pub initials: String,
}

/// Position of the cursor within the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

impl Progress {
    /// Share of the view reached so far; an empty view counts as complete.
    pub const fn percent(self) -> u16 {
        if self.total == 0 {
            return 100;
        }
        #[allow(clippy::cast_possible_truncation)]
        // (position + 1) <= total, so the quotient never exceeds 100.
        let pct = ((self.position + 1) * 100 / self.total) as u16;
        if pct > 100 { 100 } else { pct }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    dataset: Dataset,
    sibling: PathBuf,
    origin: Option<LoadOrigin>,
    view: FilteredView,
    cursor: Cursor,
    initials: String,
    track_viewed: bool,
    entered: Option<usize>,
}

impl Session {
    /// Load `source` (or its sibling) and build the session around it.
    ///
    /// The first record is not entered yet; call [`Session::enter_current`]
    /// once the UI is ready so the viewed mark is saved.
    ///
    /// # Errors
    ///
    /// Returns the store error when the dataset cannot be loaded.
    pub fn open(source: &Path, options: SessionOptions) -> Result<Self, StoreError> {
        let loaded = store::load(
            source,
            &LoadOptions {
                track_viewed: options.track_viewed,
            },
        )?;
        Ok(Self::from_loaded(loaded, options))
    }

    /// Build a session from an already loaded dataset.
    pub fn from_loaded(loaded: Loaded, options: SessionOptions) -> Self {
        let mode = FilterMode::from_flags(
            options.show_all,
            options.verbose,
            loaded.dataset.has_column(BAD_VALS),
        );
        let view = FilteredView::build(&loaded.dataset, mode);
        let cursor = Cursor::new(view.len(), loaded.dataset.width());
        debug!(
            mode = mode.label(),
            records = loaded.dataset.len(),
            navigable = view.len(),
            "session view built"
        );
        Self {
            dataset: loaded.dataset,
            sibling: loaded.sibling,
            origin: Some(loaded.origin),
            view,
            cursor,
            initials: options.initials,
            track_viewed: options.track_viewed,
            entered: None,
        }
    }

    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub const fn view(&self) -> &FilteredView {
        &self.view
    }

    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn initials(&self) -> &str {
        &self.initials
    }

    /// Where every save is written.
    pub fn sibling_path(&self) -> &Path {
        &self.sibling
    }

    pub const fn origin(&self) -> Option<LoadOrigin> {
        self.origin
    }

    /// Dataset index under the cursor.
    pub fn current_index(&self) -> Option<usize> {
        self.view.get(self.cursor.current_row()?)
    }

    /// Field name under the cursor.
    pub fn current_field(&self) -> Option<&str> {
        self.dataset
            .headers()
            .get(self.cursor.col())
            .map(String::as_str)
    }

    pub fn current_value(&self) -> Option<&str> {
        self.dataset
            .value(self.current_index()?, self.cursor.col())
    }

    pub const fn progress(&self) -> Progress {
        Progress {
            position: self.cursor.row(),
            total: self.view.len(),
        }
    }

    /// Mark the record under the cursor as viewed and save, once per entry.
    ///
    /// Returns true when a save happened.
    ///
    /// # Errors
    ///
    /// Returns the save error; the viewed mark stays set in memory.
    pub fn enter_current(&mut self) -> Result<bool, StoreError> {
        let Some(index) = self.current_index() else {
            return Ok(false);
        };
        if self.entered == Some(index) {
            return Ok(false);
        }
        self.entered = Some(index);
        if !self.track_viewed {
            return Ok(false);
        }
        self.dataset.set_flag(index, VIEWED, true);
        debug!(index, "record viewed");
        self.save()?;
        Ok(true)
    }

    /// Step to the previous record. Returns true when the cursor moved.
    ///
    /// # Errors
    ///
    /// Returns the save error raised while marking the new record viewed.
    pub fn prev(&mut self) -> Result<bool, StoreError> {
        if !self.cursor.prev() {
            return Ok(false);
        }
        self.enter_current()?;
        Ok(true)
    }

    /// Step to the next record. Returns true when the cursor moved.
    ///
    /// # Errors
    ///
    /// Returns the save error raised while marking the new record viewed.
    pub fn next(&mut self) -> Result<bool, StoreError> {
        if !self.cursor.next() {
            return Ok(false);
        }
        self.enter_current()?;
        Ok(true)
    }

    /// Jump to a position in the filtered view. Out-of-range positions are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns the save error raised while marking the new record viewed.
    pub fn jump_to(&mut self, position: usize) -> Result<bool, StoreError> {
        if !self.cursor.jump_to(position) {
            return Ok(false);
        }
        self.enter_current()?;
        Ok(true)
    }

    /// Move the field cursor; never touches the dataset.
    pub const fn prev_field(&mut self) -> bool {
        self.cursor.move_left()
    }

    pub const fn next_field(&mut self) -> bool {
        self.cursor.move_right()
    }

    pub const fn select_field(&mut self, col: usize) -> bool {
        self.cursor.select_col(col)
    }

    /// Overwrite the field under the cursor.
    ///
    /// # Errors
    ///
    /// Returns the save error after an applied edit; the edit stays in memory.
    pub fn edit_current_field(&mut self, value: &str) -> Result<EditOutcome, StoreError> {
        let Some(field) = self.current_field().map(ToOwned::to_owned) else {
            return Ok(EditOutcome::UnknownField);
        };
        self.edit_named_field(&field, value)
    }

    /// Overwrite a named field of the current record.
    ///
    /// # Errors
    ///
    /// Returns the save error after an applied edit; the edit stays in memory.
    pub fn edit_named_field(&mut self, field: &str, value: &str) -> Result<EditOutcome, StoreError> {
        let Some(index) = self.current_index() else {
            return Ok(EditOutcome::NoRecord);
        };
        let outcome = edit_field(&mut self.dataset, index, field, value, &self.initials);
        if outcome.is_applied() {
            debug!(index, field, "field edited");
            self.save()?;
        }
        Ok(outcome)
    }

    /// Replace the current record's editable fields from a comma-separated
    /// line.
    ///
    /// # Errors
    ///
    /// Returns the save error after an applied edit; the edit stays in memory.
    pub fn edit_current_row(&mut self, line: &str) -> Result<EditOutcome, StoreError> {
        let Some(index) = self.current_index() else {
            return Ok(EditOutcome::NoRecord);
        };
        let outcome = edit_row(&mut self.dataset, index, line, &self.initials);
        if outcome.is_applied() {
            debug!(index, "row edited");
            self.save()?;
        }
        Ok(outcome)
    }

    /// Rewrite the sibling file from memory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] when the file cannot be written.
    pub fn save(&self) -> Result<(), StoreError> {
        store::save(&self.dataset, &self.sibling).inspect_err(|err| {
            warn!(path = %self.sibling.display(), %err, "save failed");
        })
    }
}
