use crate::app::AppState;
use crate::domain::{checkbox, due_badge, Task};
use crate::ui::styles::{
    border_style, completed_style, default_style, due_style, due_today_style, hint_style,
    overdue_style, selected_style, title_style,
};
use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the task list for the active filter
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let today = app.file_date;
    let editing = app.store.edit_index();

    let items: Vec<ListItem> = app
        .store
        .visible_tasks()
        .enumerate()
        .map(|(row, (index, task))| {
            let line = create_task_line(task, app.use_emoji, today, editing == Some(index));
            let style = if row == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let date = today.format("%a %b %d");
    let title = format!(" 📝 To-Do List ({}) ", date);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if items.is_empty() {
        let hint = if app.store.is_empty() {
            "Nothing here yet. Press 'a' to add a task."
        } else {
            "No tasks match this filter."
        };
        let paragraph = Paragraph::new(Line::styled(hint, hint_style())).block(block);
        f.render_widget(paragraph, area);
        return;
    }

    f.render_widget(List::new(items).block(block), area);
}

/// Create a single line for a task
/// Format: ⬜ Buy milk   due today
fn create_task_line(
    task: &Task,
    use_emoji: bool,
    today: NaiveDate,
    editing: bool,
) -> Line<'static> {
    let mut spans = Vec::new();

    spans.push(Span::raw(format!("{} ", checkbox(task, use_emoji))));

    let text_style = if task.completed {
        completed_style()
    } else {
        Style::default()
    };
    spans.push(Span::styled(task.text.clone(), text_style));

    if let Some(badge) = due_badge(task, today) {
        let badge_style = if task.is_overdue(today) {
            overdue_style()
        } else if task.is_due_on(today) {
            due_today_style()
        } else {
            due_style()
        };
        spans.push(Span::raw("   ".to_string()));
        spans.push(Span::styled(badge, badge_style));
    }

    if editing {
        spans.push(Span::styled("  (editing)".to_string(), hint_style()));
    }

    Line::from(spans)
}
