use ratatui::prelude::*;
use ratatui::widgets::{Gauge, Paragraph};

use crate::app::{Layout as ScreenLayout, Model};

use super::style;

/// Text shown on the progress gauge.
pub fn progress_label(model: &Model) -> String {
    let progress = model.session.progress();
    let position = if progress.total == 0 {
        0
    } else {
        progress.position + 1
    };
    format!(
        "{}% ({}/{} records viewed)",
        progress.percent(),
        position,
        progress.total
    )
}

pub fn render_progress_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let percent = model.session.progress().percent();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(style::progress_color(percent)).bg(Color::Black))
        .percent(percent)
        .label(Span::styled(
            progress_label(model),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(gauge, area);
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model
        .session
        .sibling_path()
        .file_name()
        .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string());

    let layout = match model.layout {
        ScreenLayout::Record => "record",
        ScreenLayout::Grid => "grid",
    };
    let field = model.session.current_field().unwrap_or("-");
    let initials = if model.session.initials().is_empty() {
        "--"
    } else {
        model.session.initials()
    };

    let status = format!(
        " {}  [{}]  filter: {}  field: {}  editor: {}  ?:help",
        filename,
        layout,
        model.session.view().mode().label(),
        field,
        initials
    );

    frame.render_widget(Paragraph::new(status).style(style::status_style()), area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, toast_style) = style::toast_style(level);
    let toast = Paragraph::new(format!("{prefix} {message}")).style(toast_style);
    frame.render_widget(toast, area);
}
