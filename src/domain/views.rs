use super::enums::Filter;
use super::task::Task;
use chrono::NaiveDate;
use std::iter::{Enumerate, FusedIterator};
use std::slice::Iter;

/// Lazy view over the tasks that pass a filter.
///
/// Yields `(index, task)` where `index` is the position in the *unfiltered*
/// list, which is what the store's mutating operations expect. The view is
/// `Clone`, so it can be restarted without touching the store.
#[derive(Debug, Clone)]
pub struct VisibleTasks<'a> {
    inner: Enumerate<Iter<'a, Task>>,
    filter: Filter,
}

impl<'a> VisibleTasks<'a> {
    pub fn new(tasks: &'a [Task], filter: Filter) -> Self {
        Self {
            inner: tasks.iter().enumerate(),
            filter,
        }
    }
}

impl<'a> Iterator for VisibleTasks<'a> {
    type Item = (usize, &'a Task);

    fn next(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        self.inner.find(|(_, task)| filter.matches(task.completed))
    }
}

impl FusedIterator for VisibleTasks<'_> {}

/// Map a row of the filtered view back to its unfiltered index
pub fn resolve_visible(tasks: &[Task], filter: Filter, row: usize) -> Option<usize> {
    VisibleTasks::new(tasks, filter).nth(row).map(|(index, _)| index)
}

/// Per-filter task counts (for the filter tabs)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCounts {
    pub all: usize,
    pub active: usize,
    pub completed: usize,
}

impl FilterCounts {
    pub fn get(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.all,
            Filter::Active => self.active,
            Filter::Completed => self.completed,
        }
    }
}

/// Count tasks under every filter in one pass
pub fn count_by_filter(tasks: &[Task]) -> FilterCounts {
    let completed = tasks.iter().filter(|t| t.completed).count();
    FilterCounts {
        all: tasks.len(),
        active: tasks.len() - completed,
        completed,
    }
}

/// Checkbox glyph for a task row
pub fn checkbox(task: &Task, use_emoji: bool) -> &'static str {
    match (task.completed, use_emoji) {
        (true, true) => "✅",
        (false, true) => "⬜",
        (true, false) => "[x]",
        (false, false) => "[ ]",
    }
}

/// Due date badge relative to today
pub fn due_badge(task: &Task, today: NaiveDate) -> Option<String> {
    let due = task.due_date?;
    let label = task.due_label();
    if task.completed {
        return Some(format!("due {}", label));
    }
    Some(if due == today {
        "due today".to_string()
    } else if due < today {
        format!("overdue {}", label)
    } else {
        format!("due {}", label)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Task> {
        let mut tasks = vec![
            Task::new("one", None),
            Task::new("two", None),
            Task::new("three", None),
            Task::new("four", None),
        ];
        tasks[1].completed = true;
        tasks[3].completed = true;
        tasks
    }

    fn texts<'a>(view: impl Iterator<Item = (usize, &'a Task)>) -> Vec<(usize, &'a str)> {
        view.map(|(i, t)| (i, t.text.as_str())).collect()
    }

    #[test]
    fn test_all_is_full_list() {
        let tasks = sample();
        let view = VisibleTasks::new(&tasks, Filter::All);
        assert_eq!(
            texts(view),
            vec![(0, "one"), (1, "two"), (2, "three"), (3, "four")]
        );
    }

    #[test]
    fn test_active_and_completed_partition() {
        let tasks = sample();
        let active = texts(VisibleTasks::new(&tasks, Filter::Active));
        let completed = texts(VisibleTasks::new(&tasks, Filter::Completed));
        assert_eq!(active, vec![(0, "one"), (2, "three")]);
        assert_eq!(completed, vec![(1, "two"), (3, "four")]);
    }

    #[test]
    fn test_view_is_restartable() {
        let tasks = sample();
        let view = VisibleTasks::new(&tasks, Filter::Active);
        let first: Vec<_> = view.clone().collect();
        let second: Vec<_> = view.collect();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_visible_maps_to_unfiltered_index() {
        let tasks = sample();
        // Second row of the completed view is "four", position 3
        assert_eq!(resolve_visible(&tasks, Filter::Completed, 1), Some(3));
        assert_eq!(resolve_visible(&tasks, Filter::Active, 1), Some(2));
        assert_eq!(resolve_visible(&tasks, Filter::All, 1), Some(1));
        assert_eq!(resolve_visible(&tasks, Filter::Active, 2), None);
    }

    #[test]
    fn test_count_by_filter() {
        let counts = count_by_filter(&sample());
        assert_eq!(counts, FilterCounts { all: 4, active: 2, completed: 2 });
        assert_eq!(counts.get(Filter::Active), 2);
        assert_eq!(count_by_filter(&[]), FilterCounts::default());
    }

    #[test]
    fn test_due_badge() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let tomorrow = today.succ_opt().unwrap();

        assert_eq!(due_badge(&Task::new("x", None), today), None);
        assert_eq!(due_badge(&Task::new("x", Some(today)), today).unwrap(), "due today");
        assert_eq!(
            due_badge(&Task::new("x", Some(yesterday)), today).unwrap(),
            "overdue 2024-04-30"
        );
        assert_eq!(
            due_badge(&Task::new("x", Some(tomorrow)), today).unwrap(),
            "due 2024-05-02"
        );
    }

    #[test]
    fn test_checkbox() {
        let mut task = Task::new("x", None);
        assert_eq!(checkbox(&task, false), "[ ]");
        task.toggle();
        assert_eq!(checkbox(&task, false), "[x]");
        assert_eq!(checkbox(&task, true), "✅");
    }
}
