//! Field edits and the administrative stamps they leave behind.

use crate::store::{Dataset, EDITED, EDITOR, format_flag, is_protected};

/// What an edit request did to the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Value written and record stamped.
    Applied,
    /// New value equals the old one; nothing written.
    Unchanged,
    /// Target is `edited` or `editor`.
    Protected,
    UnknownField,
    NoRecord,
    /// Row edit supplied the wrong number of values.
    ArityMismatch { expected: usize, found: usize },
}

impl EditOutcome {
    /// Whether the dataset changed and must be persisted.
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Overwrite one field of a record and stamp it with the operator's initials.
///
/// The previous value is not retained.
pub fn edit_field(
    dataset: &mut Dataset,
    row: usize,
    field: &str,
    value: &str,
    initials: &str,
) -> EditOutcome {
    if is_protected(field) {
        return EditOutcome::Protected;
    }
    if row >= dataset.len() {
        return EditOutcome::NoRecord;
    }
    let Some(current) = dataset.field(row, field) else {
        return EditOutcome::UnknownField;
    };
    if current == value {
        return EditOutcome::Unchanged;
    }
    dataset.set_field(row, field, value);
    stamp(dataset, row, initials);
    EditOutcome::Applied
}

/// Fields an operator may overwrite, in header order.
pub fn editable_fields(dataset: &Dataset) -> Vec<&str> {
    dataset
        .headers()
        .iter()
        .map(String::as_str)
        .filter(|h| !is_protected(h))
        .collect()
}

/// Current editable values of a record joined for a row prompt.
pub fn row_prompt_text(dataset: &Dataset, row: usize) -> String {
    editable_fields(dataset)
        .into_iter()
        .filter_map(|field| dataset.field(row, field))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Replace every editable field of a record from a comma-separated line.
///
/// Values are trimmed and assigned to the editable fields in header order.
/// The record is stamped once if any value differed.
pub fn edit_row(dataset: &mut Dataset, row: usize, line: &str, initials: &str) -> EditOutcome {
    if row >= dataset.len() {
        return EditOutcome::NoRecord;
    }
    let fields: Vec<String> = editable_fields(dataset)
        .into_iter()
        .map(ToOwned::to_owned)
        .collect();
    let values: Vec<&str> = line.split(',').map(str::trim).collect();
    if values.len() != fields.len() {
        return EditOutcome::ArityMismatch {
            expected: fields.len(),
            found: values.len(),
        };
    }

    let mut changed = false;
    for (field, value) in fields.iter().zip(values) {
        if dataset.field(row, field) != Some(value) {
            dataset.set_field(row, field, value);
            changed = true;
        }
    }
    if !changed {
        return EditOutcome::Unchanged;
    }
    stamp(dataset, row, initials);
    EditOutcome::Applied
}

fn stamp(dataset: &mut Dataset, row: usize, initials: &str) {
    dataset.set_field(row, EDITED, format_flag(true));
    dataset.set_field(row, EDITOR, initials);
}
