pub mod enums;
pub mod task;
pub mod views;

pub use enums::{Filter, InputField, UiMode};
pub use task::{parse_due_date, Task};
pub use views::{checkbox, count_by_filter, due_badge, resolve_visible, FilterCounts, VisibleTasks};
