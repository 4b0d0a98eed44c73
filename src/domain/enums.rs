use serde::{Deserialize, Serialize};

/// View predicate applied to the task list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Whether a task with the given completion flag passes this filter
    pub fn matches(&self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }

    /// Display name for tabs and listings
    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Cycle to the next filter (Tab in the UI)
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Active,
            Self::Active => Self::Completed,
            Self::Completed => Self::All,
        }
    }

    /// Get all filters in tab order
    pub fn all() -> &'static [Filter] {
        &[Filter::All, Filter::Active, Filter::Completed]
    }
}

/// UI mode for the terminal front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask,
}

/// Which field of the input form has focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputField {
    #[default]
    Text,
    DueDate,
}

impl InputField {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Text => Self::DueDate,
            Self::DueDate => Self::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches() {
        assert!(Filter::All.matches(true));
        assert!(Filter::All.matches(false));
        assert!(Filter::Active.matches(false));
        assert!(!Filter::Active.matches(true));
        assert!(Filter::Completed.matches(true));
        assert!(!Filter::Completed.matches(false));
    }

    #[test]
    fn test_filter_cycle() {
        let mut filter = Filter::All;
        for _ in 0..3 {
            filter = filter.next();
        }
        assert_eq!(filter, Filter::All);
        assert_eq!(Filter::Active.next(), Filter::Completed);
    }

    #[test]
    fn test_filter_serde_names() {
        assert_eq!(serde_json::to_string(&Filter::Completed).unwrap(), "\"completed\"");
    }
}
