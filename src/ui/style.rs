//! Colors and styles shared by the review screens.
//!
//! Uses ANSI colors that adapt to the terminal's palette, except for the
//! progress gradient which needs RGB and falls back to the 256-color cube.

use ratatui::style::{Color, Modifier, Style};

use crate::app::ToastLevel;

/// Gauge color for a completion percentage: red at 0, yellow at 50, green
/// at 100.
pub fn progress_color(percent: u16) -> Color {
    let (r, g, b) = progress_rgb(percent);
    if supports_truecolor() {
        Color::Rgb(r, g, b)
    } else {
        Color::Indexed(rgb_to_xterm_256(r, g, b))
    }
}

pub(super) fn progress_rgb(percent: u16) -> (u8, u8, u8) {
    let pct = u32::from(percent.min(100));
    // Both channels stay within 0..=255 for pct in 0..=100.
    #[allow(clippy::cast_possible_truncation)]
    let rgb = if pct <= 50 {
        (255, (pct * 255 / 50) as u8, 0)
    } else {
        (((100 - pct) * 255 / 50) as u8, 255, 0)
    };
    rgb
}

/// Field names and grid headers.
pub fn header_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// The cell or field under the cursor.
pub fn cursor_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Row of the current record in the grid.
pub fn current_row_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

/// `edited` and `editor` columns.
pub fn protected_style() -> Style {
    Style::default().fg(Color::Indexed(245))
}

pub fn placeholder_style() -> Style {
    Style::default()
        .fg(Color::Indexed(245))
        .add_modifier(Modifier::ITALIC)
}

pub fn status_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn toast_style(level: ToastLevel) -> (&'static str, Style) {
    match level {
        ToastLevel::Info => ("[info]", status_style()),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
    }
}

pub fn popup_style() -> Style {
    Style::default().bg(Color::Black).fg(Color::White)
}

fn supports_truecolor() -> bool {
    if let Ok(force) = std::env::var("QCREVIEW_TRUECOLOR") {
        let value = force.to_ascii_lowercase();
        return matches!(value.as_str(), "1" | "true" | "yes" | "on");
    }
    supports_truecolor_from_env(
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn supports_truecolor_from_env(colorterm: Option<&str>, term: Option<&str>) -> bool {
    if let Some(ct) = colorterm {
        let lower = ct.to_ascii_lowercase();
        if lower.contains("truecolor") || lower.contains("24bit") {
            return true;
        }
    }
    if let Some(t) = term {
        let lower = t.to_ascii_lowercase();
        if lower.contains("direct") || lower.contains("truecolor") {
            return true;
        }
    }
    false
}

fn rgb_to_xterm_256(r: u8, g: u8, b: u8) -> u8 {
    // Result is always 0-5, fits in u8
    #[allow(clippy::cast_possible_truncation)]
    let to_cube = |v: u8| ((u16::from(v) * 5) / 255) as u8;
    16 + (36 * to_cube(r)) + (6 * to_cube(g)) + to_cube(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_gradient_endpoints() {
        assert_eq!(progress_rgb(0), (255, 0, 0));
        assert_eq!(progress_rgb(50), (255, 255, 0));
        assert_eq!(progress_rgb(100), (0, 255, 0));
    }

    #[test]
    fn test_progress_gradient_is_clamped() {
        assert_eq!(progress_rgb(250), progress_rgb(100));
    }

    #[test]
    fn test_progress_gradient_midpoints() {
        assert_eq!(progress_rgb(25), (255, 127, 0));
        assert_eq!(progress_rgb(75), (127, 255, 0));
    }

    #[test]
    fn test_truecolor_detection_without_colorterm() {
        assert!(!supports_truecolor_from_env(None, Some("xterm-256color")));
    }

    #[test]
    fn test_truecolor_detection_with_colorterm() {
        assert!(supports_truecolor_from_env(
            Some("truecolor"),
            Some("xterm-256color")
        ));
    }

    #[test]
    fn test_fallback_indexed_color_when_not_truecolor() {
        assert_eq!(rgb_to_xterm_256(255, 0, 0), 196);
        assert_eq!(rgb_to_xterm_256(0, 255, 0), 46);
    }

    #[test]
    fn test_warning_toast_is_yellow() {
        let (prefix, style) = toast_style(ToastLevel::Warning);
        assert_eq!(prefix, "[warn]");
        assert_eq!(style.bg, Some(Color::Yellow));
    }
}
