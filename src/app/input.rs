use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use crate::app::model::Layout;
use crate::app::{App, Message, Model};

impl App {
    pub(super) fn handle_event(&self, event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(*key, model),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    pub(super) fn handle_key(&self, key: KeyEvent, model: &Model) -> Option<Message> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Message::Quit);
        }

        if model.save_error.is_some() {
            return Some(Message::DismissError);
        }

        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if let Some(prompt) = model.prompt.as_ref() {
            return match key.code {
                KeyCode::Esc => Some(Message::PromptCancel),
                KeyCode::Enter => Some(Message::PromptSubmit),
                KeyCode::Backspace => {
                    let mut next = prompt.buffer.clone();
                    next.pop();
                    Some(Message::PromptInput(next))
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    let mut next = prompt.buffer.clone();
                    next.push(c);
                    Some(Message::PromptInput(next))
                }
                _ => None,
            };
        }

        if model.record_picker_active() {
            return match key.code {
                KeyCode::Char('k') | KeyCode::Up => Some(Message::PickerUp),
                KeyCode::Char('j') | KeyCode::Down => Some(Message::PickerDown),
                KeyCode::Enter => Some(Message::PickerSelect),
                KeyCode::Esc | KeyCode::Char('q' | 's') => Some(Message::PickerCancel),
                _ => None,
            };
        }

        let nav = match model.layout {
            Layout::Record => match key.code {
                KeyCode::Left | KeyCode::Char('h' | 'p') => Some(Message::PrevRecord),
                KeyCode::Right | KeyCode::Char('l' | 'n') => Some(Message::NextRecord),
                KeyCode::Up | KeyCode::Char('k') => Some(Message::PrevField),
                KeyCode::Down | KeyCode::Char('j') => Some(Message::NextField),
                _ => None,
            },
            Layout::Grid => match key.code {
                KeyCode::Up | KeyCode::Char('k') => Some(Message::PrevRecord),
                KeyCode::Down | KeyCode::Char('j') => Some(Message::NextRecord),
                KeyCode::Left | KeyCode::Char('h') => Some(Message::PrevField),
                KeyCode::Right | KeyCode::Char('l') => Some(Message::NextField),
                _ => None,
            },
        };
        if nav.is_some() {
            return nav;
        }

        match key.code {
            KeyCode::Tab => Some(Message::ToggleLayout),
            KeyCode::Char('e') | KeyCode::Enter => Some(Message::StartEdit),
            KeyCode::Char('E') => Some(Message::StartRowEdit),
            KeyCode::Char('s') => Some(Message::OpenRecordPicker),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        }
    }

    pub(super) fn view(model: &mut Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
