use crate::app::Model;
use crate::app::model::{Prompt, PromptTarget, ToastLevel};
use crate::session::{EditOutcome, row_prompt_text};
use crate::store::{StoreError, is_protected};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Step to the previous record of the view
    PrevRecord,
    /// Step to the next record of the view
    NextRecord,
    /// Move the field cursor back
    PrevField,
    /// Move the field cursor forward
    NextField,
    /// Switch between record and grid layouts
    ToggleLayout,

    // Editing
    /// Open a prompt for the field under the cursor
    StartEdit,
    /// Open a prompt for every editable field of the record
    StartRowEdit,
    /// Replace the prompt buffer
    PromptInput(String),
    /// Apply the prompt buffer
    PromptSubmit,
    /// Close the prompt without editing
    PromptCancel,

    // Record picker
    OpenRecordPicker,
    PickerUp,
    PickerDown,
    /// Jump to the highlighted record
    PickerSelect,
    PickerCancel,

    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Acknowledge a save error
    DismissError,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Update the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. Persistence
/// is delegated to the session, which saves whenever the dataset changes.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::PrevRecord => {
            let result = model.session.prev();
            settle(&mut model, result);
        }
        Message::NextRecord => {
            let result = model.session.next();
            settle(&mut model, result);
        }
        Message::PrevField => {
            model.session.prev_field();
        }
        Message::NextField => {
            model.session.next_field();
        }
        Message::ToggleLayout => {
            model.layout = model.layout.toggled();
        }

        Message::StartEdit => start_field_edit(&mut model),
        Message::StartRowEdit => {
            if let Some(index) = model.session.current_index() {
                model.prompt = Some(Prompt {
                    target: PromptTarget::Row,
                    buffer: row_prompt_text(model.session.dataset(), index),
                });
            }
        }
        Message::PromptInput(buffer) => {
            if let Some(prompt) = model.prompt.as_mut() {
                prompt.buffer = buffer;
            }
        }
        Message::PromptSubmit => {
            if let Some(prompt) = model.prompt.take() {
                submit_prompt(&mut model, prompt);
            }
        }
        Message::PromptCancel => {
            model.prompt = None;
        }

        Message::OpenRecordPicker => {
            if model.session.view().is_empty() {
                model.show_toast(ToastLevel::Info, "No records to choose from");
            } else {
                model.record_picker = Some(model.session.cursor().row());
            }
        }
        Message::PickerUp => {
            if let Some(selected) = model.record_picker.as_mut() {
                *selected = selected.saturating_sub(1);
            }
        }
        Message::PickerDown => {
            let last = model.session.view().len().saturating_sub(1);
            if let Some(selected) = model.record_picker.as_mut() {
                *selected = (*selected + 1).min(last);
            }
        }
        Message::PickerSelect => {
            if let Some(position) = model.record_picker.take() {
                let result = model.session.jump_to(position);
                settle(&mut model, result);
            }
        }
        Message::PickerCancel => {
            model.record_picker = None;
        }

        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::DismissError => {
            model.save_error = None;
        }

        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
        }

        Message::Quit => {
            model.should_quit = true;
        }
    }

    model
}

fn settle<T>(model: &mut Model, result: Result<T, StoreError>) {
    if let Err(err) = result {
        model.report_save_error(&err);
    }
}

fn start_field_edit(model: &mut Model) {
    let (Some(field), Some(value)) = (model.session.current_field(), model.session.current_value())
    else {
        return;
    };
    if is_protected(field) {
        let message = format!("{field} is maintained automatically");
        model.show_toast(ToastLevel::Info, message);
        return;
    }
    model.prompt = Some(Prompt {
        target: PromptTarget::Field(field.to_string()),
        buffer: value.to_string(),
    });
}

fn submit_prompt(model: &mut Model, prompt: Prompt) {
    let result = match &prompt.target {
        PromptTarget::Field(field) => model.session.edit_named_field(field, &prompt.buffer),
        PromptTarget::Row => model.session.edit_current_row(&prompt.buffer),
    };
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) => {
            model.report_save_error(&err);
            return;
        }
    };
    match outcome {
        EditOutcome::Applied => model.show_toast(ToastLevel::Info, "Saved"),
        EditOutcome::Unchanged => model.show_toast(ToastLevel::Info, "No change"),
        EditOutcome::Protected => {
            model.show_toast(ToastLevel::Info, "edited and editor cannot be changed");
        }
        EditOutcome::UnknownField | EditOutcome::NoRecord => {
            model.show_toast(ToastLevel::Warning, "Nothing to edit");
        }
        EditOutcome::ArityMismatch { expected, found } => model.show_toast(
            ToastLevel::Warning,
            format!("Expected {expected} values, got {found}"),
        ),
    }
}
