use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::app::Model;

use super::style;

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::styled("Record layout", section_style),
        Line::raw("  Left/h/p, Right/l/n  Previous / next record"),
        Line::raw("  Up/k, Down/j         Previous / next field"),
        Line::raw(""),
        Line::styled("Grid layout", section_style),
        Line::raw("  Up/k, Down/j         Previous / next record"),
        Line::raw("  Left/h, Right/l      Previous / next column"),
        Line::raw(""),
        Line::styled("Editing", section_style),
        Line::raw("  e / Enter            Edit field under cursor"),
        Line::raw("  E                    Edit whole row"),
        Line::raw("  Esc                  Cancel edit"),
        Line::raw(""),
        Line::styled("Other", section_style),
        Line::raw("  Tab                  Toggle record / grid"),
        Line::raw("  s                    Select record from list"),
        Line::raw("  ? / F1               Toggle help"),
        Line::raw("  q / Ctrl-c           Quit"),
        Line::raw(""),
        Line::styled("Files", section_style),
        Line::raw(format!(
            "  Saving to: {}",
            model.session.sibling_path().display()
        )),
        Line::raw(format!("  Global config: {global_cfg}")),
        Line::raw(format!("  Local override: {local_cfg}")),
    ];

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(style::popup_style());

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_prompt_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(prompt) = model.prompt.as_ref() else {
        return;
    };
    let popup_width = area.width.saturating_sub(8).max(40);
    let popup = centered_popup_rect(popup_width, 5, area);

    let block = Block::default()
        .title(prompt.title())
        .title_bottom(Line::styled(
            " Enter saves \u{2502} Esc cancels ",
            Style::default().fg(Color::Indexed(245)),
        ))
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(style::popup_style());

    let input = Line::from(vec![
        Span::raw(prompt.buffer.as_str()),
        Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)),
    ]);

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(input).block(block), popup);
}

pub fn render_record_picker_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(selected) = model.record_picker else {
        return;
    };
    let labels = model.record_labels();
    let popup_width = area.width.saturating_sub(16).max(40);
    #[allow(clippy::cast_possible_truncation)]
    // Clamped to the terminal height below.
    let needed_rows = labels.len().min(usize::from(u16::MAX - 2)) as u16 + 2;
    let popup_height = needed_rows.min(area.height.saturating_sub(4).max(6));
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let viewed = crate::store::VIEWED;
    let dataset = model.session.dataset();
    let items: Vec<ListItem> = labels
        .into_iter()
        .zip(model.session.view().indices())
        .map(|(label, &index)| {
            let marker = if dataset.flag(index, viewed) { "*" } else { " " };
            ListItem::new(format!("{marker} {label}"))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Select record")
                .borders(Borders::ALL)
                .style(style::popup_style()),
        )
        .highlight_style(style::cursor_style());
    let mut state = ListState::default().with_selected(Some(selected));

    frame.render_widget(Clear, popup);
    frame.render_stateful_widget(list, popup, &mut state);
}

pub fn render_error_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(message) = model.save_error.as_deref() else {
        return;
    };
    let popup_width = area.width.saturating_sub(16).max(40);
    let popup = centered_popup_rect(popup_width, 8, area);

    let lines = vec![
        Line::raw(message.to_string()),
        Line::raw(""),
        Line::styled(
            "Changes are kept in memory. Press any key to continue.",
            Style::default().fg(Color::Indexed(245)),
        ),
    ];
    let block = Block::default()
        .title("Save Error")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Red).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(block),
        popup,
    );
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
