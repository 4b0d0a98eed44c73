use crate::domain::{Filter, InputField, UiMode};
use crate::error::TaskError;
use crate::store::TaskStore;
use anyhow::Result;
use chrono::NaiveDate;

/// One-line message shown under the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Terminal UI state wrapped around the task store
pub struct AppState {
    pub store: TaskStore,
    /// Row in the filtered view (not an index into the full list)
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_field: InputField,
    pub status: Option<StatusMessage>,
    pub use_emoji: bool,
    /// Day the app last ran reminders for
    pub file_date: NaiveDate,
}

impl AppState {
    pub fn new(store: TaskStore, today: NaiveDate) -> Self {
        Self {
            store,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_field: InputField::Text,
            status: None,
            use_emoji: true,
            file_date: today,
        }
    }

    /// Number of rows in the filtered view
    pub fn visible_len(&self) -> usize {
        self.store.visible_tasks().count()
    }

    /// Unfiltered index of the selected row
    pub fn selected_task_index(&self) -> Option<usize> {
        self.store.resolve_visible(self.selected_index)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible_len() {
            self.selected_index += 1;
        }
    }

    /// Keep the selection inside the filtered view after it shrinks
    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// Toggle completion of the selected task
    pub fn toggle_selected(&mut self) -> Result<()> {
        if let Some(index) = self.selected_task_index() {
            let result = self.store.toggle(index);
            // A toggled task may leave the active/completed view
            self.clamp_selection();
            result?;
        }
        Ok(())
    }

    /// Delete the selected task
    pub fn delete_selected(&mut self) -> Result<()> {
        if let Some(index) = self.selected_task_index() {
            let text = self.store.tasks()[index].text.clone();
            let result = self.store.delete(index);
            self.clamp_selection();
            result?;
            self.set_info(format!("Deleted \"{}\"", text));
        }
        Ok(())
    }

    /// Delete every completed task
    pub fn clear_completed(&mut self) -> Result<()> {
        let result = self.store.clear_completed();
        self.clamp_selection();
        let removed = result?;
        if removed > 0 {
            self.set_info(format!("Cleared {} completed", removed));
        }
        Ok(())
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.store.set_filter(filter);
        self.selected_index = 0;
    }

    pub fn cycle_filter(&mut self) {
        let next = self.store.filter().next();
        self.set_filter(next);
    }

    /// Open an empty input form
    pub fn start_add_task(&mut self) {
        self.store.cancel_edit();
        self.input_field = InputField::Text;
        self.ui_mode = UiMode::AddingTask;
    }

    /// Open the input form pre-filled with the selected task
    pub fn start_edit_task(&mut self) {
        if let Some(index) = self.selected_task_index() {
            if self.store.begin_edit(index) {
                self.input_field = InputField::Text;
                self.ui_mode = UiMode::EditingTask;
            }
        }
    }

    /// Switch focus between text and due date
    pub fn input_form_toggle_field(&mut self) {
        self.input_field = self.input_field.toggle();
    }

    fn focused_input(&mut self) -> &mut String {
        match self.input_field {
            InputField::Text => self.store.pending_text_mut(),
            InputField::DueDate => self.store.pending_due_mut(),
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        self.focused_input().push(c);
    }

    pub fn input_form_backspace(&mut self) {
        self.focused_input().pop();
    }

    /// Submit the form. Blank text leaves the form open and does nothing;
    /// a bad due date leaves it open with an error.
    pub fn submit_input_form(&mut self) -> Result<()> {
        match self.store.submit() {
            Ok(false) => Ok(()),
            Ok(true) => {
                self.ui_mode = UiMode::Normal;
                self.status = None;
                // An edit resets completion, which can drop the task from the view
                self.clamp_selection();
                Ok(())
            }
            Err(e) => match e.downcast::<TaskError>() {
                Ok(task_error) => {
                    self.set_error(task_error.to_string());
                    Ok(())
                }
                Err(write_error) => {
                    // The change is in memory; close the form and let the
                    // ticker retry the write
                    self.ui_mode = UiMode::Normal;
                    self.clamp_selection();
                    Err(write_error)
                }
            },
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.store.cancel_edit();
        self.ui_mode = UiMode::Normal;
    }

    pub fn set_info(&mut self, text: String) {
        self.status = Some(StatusMessage { text, is_error: false });
    }

    pub fn set_error(&mut self, text: String) {
        self.status = Some(StatusMessage { text, is_error: true });
    }

    /// Record the outcome of an operation in the status line
    pub fn report(&mut self, result: Result<()>) {
        if let Err(e) = result {
            self.set_error(format!("Not saved: {:#}", e));
        }
    }

    /// Send reminders for today's open tasks
    pub fn remind(&mut self) -> usize {
        let sent = self.store.remind_due_today(self.file_date);
        if sent > 0 {
            self.set_info(format!("{} task(s) due today", sent));
        }
        sent
    }

    /// Check if the date has moved past the day reminders last ran for
    pub fn has_day_changed(&self, today: NaiveDate) -> bool {
        today != self.file_date
    }

    /// Called on every tick: retry failed writes, re-run reminders after
    /// midnight
    pub fn tick(&mut self, today: NaiveDate) {
        if self.store.is_dirty() {
            let result = self.store.flush();
            self.report(result);
        }

        if self.has_day_changed(today) {
            tracing::info!(%today, "day changed, re-running reminders");
            self.file_date = today;
            self.remind();
        }
    }
}
