use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui_image::{Resize, StatefulImage};

use crate::app::{CurrentImage, Model};

use super::style;

/// Draw the current record's image, or a placeholder explaining its absence.
pub fn render_image_pane(model: &mut Model, frame: &mut Frame, area: Rect) {
    let lookup = model.current_lookup();
    let title = match &model.image {
        Some(CurrentImage::Ready { path, .. } | CurrentImage::Failed { path, .. }) => path
            .file_name()
            .map_or_else(String::new, |name| name.to_string_lossy().to_string()),
        None => "Image".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let placeholder = match model.image.as_mut() {
        Some(CurrentImage::Ready { protocol, .. }) => {
            let image = StatefulImage::default().resize(Resize::Scale(None));
            frame.render_stateful_widget(image, inner, protocol.as_mut());
            return;
        }
        Some(CurrentImage::Failed { reason, .. }) => format!("Image unreadable\n{reason}"),
        None => lookup
            .and_then(|lookup| lookup.placeholder())
            .unwrap_or_else(|| "Image preview unavailable".to_string()),
    };
    frame.render_widget(
        Paragraph::new(placeholder)
            .style(style::placeholder_style())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        inner,
    );
}
