use crate::domain::{
    count_by_filter, parse_due_date, resolve_visible, Filter, FilterCounts, Task, VisibleTasks,
};
use crate::error::TaskError;
use crate::notifications::{Notifier, TASK_DUE_TITLE};
use crate::persistence::{decode_tasks, encode_tasks, Slot};
use anyhow::Result;
use chrono::NaiveDate;
use uuid::Uuid;

/// Owns the task list, the active filter and the in-progress edit.
///
/// Every operation that changes the list writes the whole list to the
/// slot before returning. Indices are always positions in the unfiltered
/// list; use [`TaskStore::resolve_visible`] to translate a row of the
/// filtered view.
pub struct TaskStore {
    tasks: Vec<Task>,
    filter: Filter,
    edit_index: Option<usize>,
    pending_text: String,
    pending_due: String,
    slot: Box<dyn Slot>,
    notifier: Box<dyn Notifier>,
    /// Set when the last write failed and the slot is behind memory
    dirty: bool,
}

impl TaskStore {
    /// Build a store from whatever the slot holds. Never fails: a missing,
    /// unreadable or malformed slot starts an empty list.
    pub fn load(slot: Box<dyn Slot>, notifier: Box<dyn Notifier>) -> Self {
        let tasks = match slot.read() {
            Ok(None) => {
                tracing::info!(slot = %slot.describe(), "no saved tasks, starting empty");
                Vec::new()
            }
            Ok(Some(raw)) => match decode_tasks(&raw) {
                Ok(decoded) => {
                    if decoded.dropped > 0 {
                        tracing::warn!(dropped = decoded.dropped, "skipped malformed task entries");
                    }
                    tracing::info!(
                        count = decoded.tasks.len(),
                        slot = %slot.describe(),
                        "loaded tasks"
                    );
                    decoded.tasks
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        slot = %slot.describe(),
                        "saved tasks unusable, starting empty"
                    );
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    slot = %slot.describe(),
                    "could not read saved tasks, starting empty"
                );
                Vec::new()
            }
        };

        Self {
            tasks,
            filter: Filter::All,
            edit_index: None,
            pending_text: String::new(),
            pending_due: String::new(),
            slot,
            notifier,
            dirty: false,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn edit_index(&self) -> Option<usize> {
        self.edit_index
    }

    pub fn is_editing(&self) -> bool {
        self.edit_index.is_some()
    }

    pub fn pending_text(&self) -> &str {
        &self.pending_text
    }

    pub fn pending_due(&self) -> &str {
        &self.pending_due
    }

    pub fn pending_text_mut(&mut self) -> &mut String {
        &mut self.pending_text
    }

    pub fn pending_due_mut(&mut self) -> &mut String {
        &mut self.pending_due
    }

    /// True when a write failed and [`TaskStore::flush`] has work to do
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Add a task, or replace the task under edit.
    ///
    /// Blank text declines silently (`Ok(false)`). When an edit is in
    /// progress the whole record is replaced, so `completed` goes back to
    /// false; the in-memory id is kept so selections stay put.
    pub fn add(&mut self, text: &str, due_date: Option<NaiveDate>) -> Result<bool> {
        if text.trim().is_empty() {
            return Ok(false);
        }

        match self.edit_index.take() {
            Some(index) if index < self.tasks.len() => {
                let id = self.tasks[index].id;
                self.tasks[index] = Task {
                    id,
                    ..Task::new(text, due_date)
                };
            }
            _ => self.tasks.push(Task::new(text, due_date)),
        }

        self.clear_pending();
        self.persist()?;
        Ok(true)
    }

    /// Run [`TaskStore::add`] with the pending input
    pub fn submit(&mut self) -> Result<bool> {
        let due = parse_due_date(&self.pending_due)
            .map_err(|_| TaskError::InvalidDueDate(self.pending_due.trim().to_string()))?;
        let text = self.pending_text.clone();
        self.add(&text, due)
    }

    /// Flip the completion flag of the task at `index`
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let Some(task) = self.tasks.get_mut(index) else {
            return Ok(false);
        };
        task.toggle();
        self.persist()?;
        Ok(true)
    }

    /// Load the task at `index` into the pending input and mark it as the
    /// edit target. Transient, nothing is written.
    pub fn begin_edit(&mut self, index: usize) -> bool {
        let Some(task) = self.tasks.get(index) else {
            return false;
        };
        self.pending_text = task.text.clone();
        self.pending_due = task.due_label();
        self.edit_index = Some(index);
        true
    }

    /// Leave editing mode and drop the pending input
    pub fn cancel_edit(&mut self) {
        self.edit_index = None;
        self.clear_pending();
    }

    /// Remove the task at `index`; later tasks shift down by one
    pub fn delete(&mut self, index: usize) -> Result<bool> {
        if index >= self.tasks.len() {
            return Ok(false);
        }
        self.tasks.remove(index);

        let edit_index = self.edit_index;
        match edit_index {
            Some(edit) if edit == index => self.cancel_edit(),
            Some(edit) if edit > index => self.edit_index = Some(edit - 1),
            _ => {}
        }

        self.persist()?;
        Ok(true)
    }

    /// Remove every completed task, returning how many went
    pub fn clear_completed(&mut self) -> Result<usize> {
        let editing_id = self.edit_index.and_then(|i| self.tasks.get(i)).map(|t| t.id);
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        if removed == 0 {
            return Ok(0);
        }

        match editing_id.and_then(|id| self.position_of(id)) {
            Some(index) => self.edit_index = Some(index),
            None if self.edit_index.is_some() => self.cancel_edit(),
            None => {}
        }

        self.persist()?;
        Ok(removed)
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Lazy view of the tasks passing the active filter, with their
    /// unfiltered indices
    pub fn visible_tasks(&self) -> VisibleTasks<'_> {
        VisibleTasks::new(&self.tasks, self.filter)
    }

    /// Map a row of the filtered view to its unfiltered index
    pub fn resolve_visible(&self, row: usize) -> Option<usize> {
        resolve_visible(&self.tasks, self.filter, row)
    }

    /// Current position of the task with this id
    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn counts(&self) -> FilterCounts {
        count_by_filter(&self.tasks)
    }

    /// Open tasks due on `day`
    pub fn due_on(&self, day: NaiveDate) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(move |t| t.is_due_on(day))
    }

    /// Hand open tasks due `today` to the notifier. Permission is only
    /// asked for when there is something to say. Returns how many
    /// reminders were handed over.
    pub fn remind_due_today(&self, today: NaiveDate) -> usize {
        let due: Vec<&Task> = self.due_on(today).collect();
        if due.is_empty() {
            return 0;
        }
        if !self.notifier.request_permission() {
            tracing::info!(count = due.len(), "notification permission denied, skipping reminders");
            return 0;
        }
        for task in &due {
            self.notifier.notify(TASK_DUE_TITLE, &task.text);
        }
        tracing::info!(count = due.len(), "sent due-today reminders");
        due.len()
    }

    /// Retry a failed write
    pub fn flush(&mut self) -> Result<()> {
        if self.dirty {
            self.persist()?;
        }
        Ok(())
    }

    fn clear_pending(&mut self) {
        self.pending_text.clear();
        self.pending_due.clear();
    }

    fn persist(&mut self) -> Result<()> {
        let result = encode_tasks(&self.tasks).and_then(|raw| self.slot.write(&raw));
        match &result {
            Ok(()) => {
                self.dirty = false;
                tracing::debug!(count = self.tasks.len(), "saved tasks");
            }
            Err(e) => {
                self.dirty = true;
                tracing::error!(error = %e, slot = %self.slot.describe(), "failed to save tasks");
            }
        }
        result
    }
}
