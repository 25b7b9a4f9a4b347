// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. store::StoreError)
    clippy::module_name_repetitions
)]

//! # qcreview
//!
//! A terminal reviewer for tabular measurement data.
//!
//! qcreview walks an operator through the records of a CSV file one at a
//! time, next to the image that belongs to each record, and keeps a sibling
//! `<stem>_edited.csv` up to date with:
//! - which records have been viewed
//! - corrected values, stamped with the operator's initials
//!
//! ## Architecture
//!
//! The data side is plain Rust with no terminal types:
//! - **Store**: the record table and its CSV persistence
//! - **Session**: filtered view, cursor and edits over one dataset
//!
//! The terminal side uses The Elm Architecture (TEA):
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: State transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`store`]: Record table, CSV load/save and labeled text import
//! - [`session`]: Navigation, filtering and editing
//! - [`image`]: Image lookup, decoding and terminal protocols
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved default flags
//! - [`chooser`]: Startup file and directory choosers

pub mod app;
pub mod chooser;
pub mod config;
pub mod image;
pub mod session;
pub mod store;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::session::{Session, SessionOptions};
    pub use crate::store::{Dataset, StoreError};
}
