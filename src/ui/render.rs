use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{Layout as ScreenLayout, Model};
use crate::store::is_protected;

use super::{GRID_MAX_COLUMN_WIDTH, RECORD_WIDTH_PERCENT, images, overlays, status, style};

/// Split the record layout into the field table and the image pane.
pub fn split_record_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(RECORD_WIDTH_PERCENT),
            Constraint::Percentage(100 - RECORD_WIDTH_PERCENT),
        ])
        .split(area)
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    status::render_progress_bar(model, frame, rows[0]);

    if model.session.view().is_empty() {
        render_empty_view(model, frame, rows[1]);
    } else {
        match model.layout {
            ScreenLayout::Record => {
                let columns = split_record_columns(rows[1]);
                render_record_table(model, frame, columns[0]);
                images::render_image_pane(model, frame, columns[1]);
            }
            ScreenLayout::Grid => render_grid(model, frame, rows[1]),
        }
    }

    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, rows[2]);
    } else {
        status::render_status_bar(model, frame, rows[2]);
    }

    if model.save_error.is_some() {
        overlays::render_error_overlay(model, frame, area);
    } else if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    } else if model.prompt.is_some() {
        overlays::render_prompt_overlay(model, frame, area);
    } else if model.record_picker_active() {
        overlays::render_record_picker_overlay(model, frame, area);
    }
}

fn render_empty_view(model: &Model, frame: &mut Frame, area: Rect) {
    let text = format!(
        "No records to review ({} filter). Use --show-all to see every record.",
        model.session.view().mode().label()
    );
    let block = Block::default().borders(Borders::ALL).title("Records");
    frame.render_widget(
        Paragraph::new(text)
            .style(style::placeholder_style())
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn render_record_table(model: &Model, frame: &mut Frame, area: Rect) {
    let session = &model.session;
    let Some(index) = session.current_index() else {
        return;
    };
    let dataset = session.dataset();
    let name_width = dataset
        .headers()
        .iter()
        .map(|h| UnicodeWidthStr::width(h.as_str()))
        .max()
        .unwrap_or(5)
        .max(5);

    let rows: Vec<Row> = dataset
        .fields(index)
        .map(|(field, value)| {
            let row = Row::new(vec![
                Cell::from(field.to_string()).style(style::header_style()),
                Cell::from(value.to_string()),
            ]);
            if is_protected(field) {
                row.style(style::protected_style())
            } else {
                row
            }
        })
        .collect();

    #[allow(clippy::cast_possible_truncation)]
    // Header names are short; clamp keeps the cast in range.
    let name_width = name_width.min(usize::from(u16::MAX)) as u16;
    let table = Table::new(rows, [Constraint::Length(name_width), Constraint::Min(1)])
        .header(Row::new(vec!["Field", "Value"]).style(style::header_style()))
        .row_highlight_style(style::cursor_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Record {}", index + 1)),
        );
    let mut state = TableState::default().with_selected(Some(session.cursor().col()));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_grid(model: &Model, frame: &mut Frame, area: Rect) {
    let session = &model.session;
    let dataset = session.dataset();
    let cursor = session.cursor();
    let view = session.view().indices();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} of {} records", view.len(), dataset.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // One row for the header.
    let visible_rows = usize::from(inner.height.saturating_sub(1)).max(1);
    let rows = visible_window(cursor.row(), view.len(), visible_rows);
    let window: Vec<usize> = view[rows.clone()].to_vec();

    let widths: Vec<usize> = (0..dataset.width())
        .map(|col| column_width(model, col, &window))
        .collect();
    let cols = fit_columns(&widths, cursor.col(), usize::from(inner.width));

    let header = Row::new(
        cols.clone()
            .map(|col| Cell::from(dataset.headers()[col].clone()))
            .collect::<Vec<_>>(),
    )
    .style(style::header_style());

    let body: Vec<Row> = rows
        .zip(window.iter())
        .map(|(position, &index)| {
            let cells: Vec<Cell> = cols
                .clone()
                .map(|col| {
                    let value = dataset.value(index, col).unwrap_or_default();
                    let cell = Cell::from(truncate_to_width(value, widths[col]));
                    if position == cursor.row() && col == cursor.col() {
                        cell.style(style::cursor_style())
                    } else {
                        cell
                    }
                })
                .collect();
            let row = Row::new(cells);
            if position == cursor.row() {
                row.style(style::current_row_style())
            } else {
                row
            }
        })
        .collect();

    #[allow(clippy::cast_possible_truncation)]
    // Widths are capped by GRID_MAX_COLUMN_WIDTH.
    let constraints: Vec<Constraint> = cols
        .map(|col| Constraint::Length(widths[col] as u16))
        .collect();
    frame.render_widget(Table::new(body, constraints).header(header), inner);
}

fn column_width(model: &Model, col: usize, window: &[usize]) -> usize {
    let dataset = model.session.dataset();
    let header = dataset
        .headers()
        .get(col)
        .map_or(0, |h| UnicodeWidthStr::width(h.as_str()));
    window
        .iter()
        .filter_map(|&index| dataset.value(index, col))
        .map(UnicodeWidthStr::width)
        .fold(header, usize::max)
        .clamp(1, GRID_MAX_COLUMN_WIDTH)
}

/// Range of `len` items of which `visible` fit, keeping `selected` in view.
pub(super) fn visible_window(selected: usize, len: usize, visible: usize) -> std::ops::Range<usize> {
    if len <= visible {
        return 0..len;
    }
    let max_start = len - visible;
    let start = selected.saturating_sub(visible / 2).min(max_start);
    start..start + visible
}

/// Columns that fit in `available` cells, starting early enough to include
/// `selected`. Each column is followed by one separator cell.
pub(super) fn fit_columns(
    widths: &[usize],
    selected: usize,
    available: usize,
) -> std::ops::Range<usize> {
    if widths.is_empty() {
        return 0..0;
    }
    let selected = selected.min(widths.len() - 1);
    let mut start = selected;
    let mut used = widths[selected] + 1;
    while start > 0 && used + widths[start - 1] + 1 <= available {
        start -= 1;
        used += widths[start] + 1;
    }
    let mut end = selected + 1;
    while end < widths.len() && used + widths[end] + 1 <= available {
        used += widths[end] + 1;
        end += 1;
    }
    start..end
}

/// Cut `text` to at most `max` display columns, marking the cut with an
/// ellipsis.
pub(super) fn truncate_to_width(text: &str, max: usize) -> String {
    if UnicodeWidthStr::width(text) <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
