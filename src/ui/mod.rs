pub mod filter_tabs;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod status_bar;
pub mod styles;

use crate::app::AppState;
use crate::domain::UiMode;
use filter_tabs::render_filter_tabs;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use ratatui::Frame;
use status_bar::render_status_bar;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app.ui_mode, layout.keybindings_area);
    render_filter_tabs(f, app.store.filter(), app.store.counts(), layout.filter_area);
    render_list_pane(f, app, layout.list_area);
    render_status_bar(f, app.status.as_ref(), app.store.is_dirty(), layout.status_area);

    if app.ui_mode != UiMode::Normal {
        render_input_form(f, app, size);
    }
}
