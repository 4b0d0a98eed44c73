use crate::app::StatusMessage;
use crate::ui::styles::{error_style, hint_style, info_style};
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Render the one-line status message, or the unsaved marker
pub fn render_status_bar(f: &mut Frame, status: Option<&StatusMessage>, dirty: bool, area: Rect) {
    let line = match status {
        Some(message) if message.is_error => {
            Line::styled(format!(" {}", message.text), error_style())
        }
        Some(message) => Line::styled(format!(" {}", message.text), info_style()),
        None if dirty => Line::styled(" Unsaved changes, retrying…", error_style()),
        None => Line::styled("", hint_style()),
    };
    f.render_widget(Paragraph::new(line), area);
}
