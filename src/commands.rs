//! Non-interactive commands (`tend add`, `tend list`, ...).
//!
//! Task numbers are 1-based positions in the full list, so a number printed
//! by `tend list --filter active` can be passed straight to `done`/`edit`/`rm`.

use crate::domain::{checkbox, due_badge, parse_due_date, Filter};
use crate::error::TaskError;
use crate::store::TaskStore;
use anyhow::Result;
use chrono::NaiveDate;

/// Turn a 1-based task number into an index into the full list
pub fn task_index(store: &TaskStore, number: usize) -> Result<usize, TaskError> {
    if number == 0 || number > store.len() {
        return Err(TaskError::NoSuchTask(number));
    }
    Ok(number - 1)
}

/// Parse an optional `--due` argument
pub fn parse_due_arg(due: Option<&str>) -> Result<Option<NaiveDate>, TaskError> {
    match due {
        None => Ok(None),
        Some(raw) => parse_due_date(raw).map_err(|_| TaskError::InvalidDueDate(raw.to_string())),
    }
}

pub fn add(store: &mut TaskStore, text: &str, due: Option<&str>) -> Result<String> {
    let due = parse_due_arg(due)?;
    if !store.add(text, due)? {
        return Err(TaskError::BlankText.into());
    }
    Ok(format!("Added task {}: {}", store.len(), text.trim()))
}

pub fn toggle(store: &mut TaskStore, number: usize) -> Result<String> {
    let index = task_index(store, number)?;
    store.toggle(index)?;
    let task = &store.tasks()[index];
    let state = if task.completed { "done" } else { "not done" };
    Ok(format!("Marked task {} {}: {}", number, state, task.text))
}

/// Replace task `number` (edit semantics: completion resets)
pub fn edit(store: &mut TaskStore, number: usize, text: &str, due: Option<&str>) -> Result<String> {
    let index = task_index(store, number)?;
    let due = parse_due_arg(due)?;
    store.begin_edit(index);
    if !store.add(text, due)? {
        store.cancel_edit();
        return Err(TaskError::BlankText.into());
    }
    Ok(format!("Updated task {}: {}", number, text.trim()))
}

pub fn remove(store: &mut TaskStore, number: usize) -> Result<String> {
    let index = task_index(store, number)?;
    let text = store.tasks()[index].text.clone();
    store.delete(index)?;
    Ok(format!("Deleted task {}: {}", number, text))
}

pub fn clear_completed(store: &mut TaskStore) -> Result<String> {
    let removed = store.clear_completed()?;
    Ok(format!("Cleared {} completed task(s)", removed))
}

/// Numbered rows of the filtered view
pub fn list(store: &mut TaskStore, filter: Filter, today: NaiveDate) -> Vec<String> {
    store.set_filter(filter);
    store
        .visible_tasks()
        .map(|(index, task)| {
            let mut row = format!("{:>3}. {} {}", index + 1, checkbox(task, false), task.text);
            if let Some(badge) = due_badge(task, today) {
                row.push_str("   ");
                row.push_str(&badge);
            }
            row
        })
        .collect()
}

pub fn remind(store: &TaskStore, today: NaiveDate) -> String {
    let due = store.due_on(today).count();
    if due == 0 {
        return "Nothing due today".to_string();
    }
    let sent = store.remind_due_today(today);
    if sent == 0 {
        format!("{} task(s) due today; notifications unavailable", due)
    } else {
        format!("Sent {} reminder(s)", sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::testing::RecordingNotifier;
    use crate::notifications::DisabledNotifier;
    use crate::persistence::slot::MemorySlot;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn store() -> TaskStore {
        TaskStore::load(Box::new(MemorySlot::default()), Box::new(DisabledNotifier))
    }

    #[test]
    fn test_task_index_bounds() {
        let mut store = store();
        store.add("a", None).unwrap();
        assert_eq!(task_index(&store, 1), Ok(0));
        assert_eq!(task_index(&store, 0), Err(TaskError::NoSuchTask(0)));
        assert_eq!(task_index(&store, 2), Err(TaskError::NoSuchTask(2)));
    }

    #[test]
    fn test_add_and_list() {
        let mut store = store();
        add(&mut store, "Buy milk", None).unwrap();
        add(&mut store, "Pay rent", Some("2024-01-01")).unwrap();
        toggle(&mut store, 1).unwrap();

        assert_eq!(
            list(&mut store, Filter::All, today()),
            vec!["  1. [x] Buy milk", "  2. [ ] Pay rent   due today"]
        );
        // Numbers stay the unfiltered positions
        assert_eq!(
            list(&mut store, Filter::Active, today()),
            vec!["  2. [ ] Pay rent   due today"]
        );
    }

    #[test]
    fn test_add_rejects_blank_and_bad_dates() {
        let mut store = store();
        let err = add(&mut store, "  ", None).unwrap_err();
        assert_eq!(err.downcast_ref::<TaskError>(), Some(&TaskError::BlankText));

        let err = add(&mut store, "x", Some("01/02/2024")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TaskError>(),
            Some(&TaskError::InvalidDueDate("01/02/2024".to_string()))
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_edit_replaces_record() {
        let mut store = store();
        add(&mut store, "Buy milk", None).unwrap();
        toggle(&mut store, 1).unwrap();
        edit(&mut store, 1, "Buy oat milk", Some("2024-01-01")).unwrap();

        let task = &store.tasks()[0];
        assert_eq!(task.text, "Buy oat milk");
        assert!(!task.completed);
        assert_eq!(task.due_date, Some(today()));
    }

    #[test]
    fn test_blank_edit_leaves_task() {
        let mut store = store();
        add(&mut store, "keep", None).unwrap();
        assert!(edit(&mut store, 1, " ", None).is_err());
        assert_eq!(store.tasks()[0].text, "keep");
        assert!(!store.is_editing());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut store = store();
        for text in ["a", "b", "c"] {
            add(&mut store, text, None).unwrap();
        }
        remove(&mut store, 2).unwrap();
        toggle(&mut store, 1).unwrap();
        assert_eq!(clear_completed(&mut store).unwrap(), "Cleared 1 completed task(s)");
        assert_eq!(store.tasks()[0].text, "c");
        assert!(remove(&mut store, 5).is_err());
    }

    #[test]
    fn test_remind_messages() {
        let notifier = Rc::new(RecordingNotifier::granting());
        let mut store = TaskStore::load(
            Box::new(MemorySlot::default()),
            Box::new(notifier.clone()),
        );
        assert_eq!(remind(&store, today()), "Nothing due today");

        store.add("call mum", Some(today())).unwrap();
        assert_eq!(remind(&store, today()), "Sent 1 reminder(s)");
        assert_eq!(notifier.bodies(), vec!["call mum".to_string()]);

        let mut denied = TaskStore::load(
            Box::new(MemorySlot::default()),
            Box::new(DisabledNotifier),
        );
        denied.add("call mum", Some(today())).unwrap();
        assert_eq!(
            remind(&denied, today()),
            "1 task(s) due today; notifications unavailable"
        );
    }
}
