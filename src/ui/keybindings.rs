use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let hints = match mode {
        UiMode::Normal => Line::from(vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("Space toggle   "),
            Span::raw("a add   "),
            Span::raw("e edit   "),
            Span::raw("d delete   "),
            Span::raw("Tab/1-3 filter   "),
            Span::raw("C clear done   "),
            Span::raw("r remind   "),
            Span::raw("q quit"),
        ]),
        UiMode::AddingTask | UiMode::EditingTask => Line::from(vec![
            Span::raw(" Tab switch field   "),
            Span::raw("Enter save   "),
            Span::raw("Esc cancel"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
