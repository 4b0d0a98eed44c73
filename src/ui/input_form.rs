use crate::app::AppState;
use crate::domain::{InputField, UiMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding or editing a task
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(title_text) = form_title(app) else {
        return;
    };

    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let mut lines = Vec::new();
    lines.push(Line::raw(""));
    push_field(&mut lines, "Task:", app.store.pending_text(), app.input_field == InputField::Text);
    lines.push(Line::raw(""));
    push_field(
        &mut lines,
        "Due date (YYYY-MM-DD, optional):",
        app.store.pending_due(),
        app.input_field == InputField::DueDate,
    );
    lines.push(Line::raw(""));
    lines.push(Line::raw("Tab to switch fields  ·  Enter to save  ·  Esc to cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title_text, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Title of the open form; the store's edit target decides add vs edit
fn form_title(app: &AppState) -> Option<&'static str> {
    match app.ui_mode {
        UiMode::Normal => None,
        UiMode::AddingTask | UiMode::EditingTask if app.store.is_editing() => {
            Some(" Edit Task ")
        }
        UiMode::AddingTask | UiMode::EditingTask => Some(" Add Task "),
    }
}

fn push_field<'a>(lines: &mut Vec<Line<'a>>, label: &'a str, value: &'a str, focused: bool) {
    if focused {
        lines.push(Line::raw(format!("{} (editing)", label)));
    } else {
        lines.push(Line::raw(label));
    }

    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(value, modal_title_style()),
        if focused {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::DisabledNotifier;
    use crate::persistence::slot::MemorySlot;
    use crate::store::TaskStore;
    use chrono::NaiveDate;

    fn create_test_app() -> AppState {
        let mut store = TaskStore::load(
            Box::new(MemorySlot::default()),
            Box::new(DisabledNotifier),
        );
        store.add("Task 1", None).unwrap();
        AppState::new(store, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap())
    }

    #[test]
    fn test_form_title_follows_edit_target() {
        let mut app = create_test_app();
        assert_eq!(form_title(&app), None);

        app.start_add_task();
        assert_eq!(form_title(&app), Some(" Add Task "));

        app.cancel_input_form();
        app.start_edit_task();
        assert_eq!(form_title(&app), Some(" Edit Task "));

        app.cancel_input_form();
        assert_eq!(form_title(&app), None);
    }
}
