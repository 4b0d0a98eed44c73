use thiserror::Error;

/// User-facing errors from task commands
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    /// Task numbers are 1-based, as shown by `tend list`
    #[error("no task number {0}")]
    NoSuchTask(usize),
    #[error("invalid due date '{0}', use YYYY-MM-DD")]
    InvalidDueDate(String),
    #[error("task text cannot be blank")]
    BlankText,
}
