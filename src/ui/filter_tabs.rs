use crate::domain::{Filter, FilterCounts};
use crate::ui::styles::{border_style, default_style, tab_highlight_style};
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

/// Tab labels with counts, e.g. "Active (3)"
pub fn tab_titles(counts: FilterCounts) -> Vec<String> {
    Filter::all()
        .iter()
        .enumerate()
        .map(|(i, filter)| format!("{} {} ({})", i + 1, filter.name(), counts.get(*filter)))
        .collect()
}

/// Render the All / Active / Completed tabs
pub fn render_filter_tabs(f: &mut Frame, active: Filter, counts: FilterCounts, area: Rect) {
    let titles: Vec<Line> = tab_titles(counts).into_iter().map(Line::from).collect();
    let selected = Filter::all().iter().position(|f| *f == active).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).border_style(border_style()))
        .style(default_style())
        .highlight_style(tab_highlight_style())
        .select(selected);

    f.render_widget(tabs, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_titles() {
        let counts = FilterCounts { all: 5, active: 3, completed: 2 };
        assert_eq!(
            tab_titles(counts),
            vec!["1 All (5)", "2 Active (3)", "3 Completed (2)"]
        );
    }
}
