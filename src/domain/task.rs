use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Date format used for due dates on disk and on the command line
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A single to-do record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// In-memory identity (not persisted, regenerated on load)
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Display text, never blank
    pub text: String,
    /// Completion flag
    #[serde(default)]
    pub completed: bool,
    /// Optional due date
    #[serde(
        rename = "dueDate",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_due",
        deserialize_with = "deserialize_due"
    )]
    pub due_date: Option<NaiveDate>,
}

// Identity is positional/in-memory only; two tasks are equal when their
// persisted fields are.
impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.completed == other.completed
            && self.due_date == other.due_date
    }
}

impl Eq for Task {}

impl Task {
    pub fn new(text: impl Into<String>, due_date: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
            due_date,
        }
    }

    /// Flip the completion flag
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Due on the given day and still open
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        !self.completed && self.due_date == Some(day)
    }

    /// Past its due date and still open
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }

    /// Due date as `YYYY-MM-DD`, or empty
    pub fn due_label(&self) -> String {
        self.due_date
            .map(|d| d.format(DUE_DATE_FORMAT).to_string())
            .unwrap_or_default()
    }
}

/// Parse a due date, treating blank input as "no due date"
pub fn parse_due_date(input: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT).map(Some)
}

fn serialize_due<S: Serializer>(due: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
    match due {
        Some(date) => serializer.serialize_str(&date.format(DUE_DATE_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

/// Lenient reader: null, empty and unparseable values all mean "no due date"
fn deserialize_due<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => parse_due_date(&s).ok().flatten(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("Buy milk", None);
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_toggle_is_involution() {
        let mut task = Task::new("Buy milk", None);
        task.toggle();
        assert!(task.completed);
        task.toggle();
        assert!(!task.completed);
    }

    #[test]
    fn test_serialize_shape() {
        let mut task = Task::new("Buy oat milk", Some(date(2024, 1, 1)));
        task.completed = true;
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "text": "Buy oat milk",
                "completed": true,
                "dueDate": "2024-01-01"
            })
        );

        let plain = serde_json::to_value(Task::new("No date", None)).unwrap();
        assert_eq!(plain, serde_json::json!({ "text": "No date", "completed": false }));
    }

    #[test]
    fn test_deserialize_lenient_due_date() {
        let cases = [
            r#"{"text":"a"}"#,
            r#"{"text":"a","dueDate":null}"#,
            r#"{"text":"a","dueDate":""}"#,
            r#"{"text":"a","dueDate":"tomorrow"}"#,
            r#"{"text":"a","dueDate":42}"#,
        ];
        for raw in cases {
            let task: Task = serde_json::from_str(raw).unwrap();
            assert_eq!(task.due_date, None, "input: {raw}");
            assert!(!task.completed);
        }

        let task: Task = serde_json::from_str(r#"{"text":"a","dueDate":"2024-02-29"}"#).unwrap();
        assert_eq!(task.due_date, Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_equality_ignores_id() {
        let a = Task::new("same", None);
        let b = Task::new("same", None);
        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
    }

    #[test]
    fn test_due_checks() {
        let today = date(2024, 3, 10);
        let mut task = Task::new("pay rent", Some(today));
        assert!(task.is_due_on(today));
        assert!(!task.is_overdue(today));
        assert!(task.is_overdue(date(2024, 3, 11)));

        task.toggle();
        assert!(!task.is_due_on(today));
        assert!(!task.is_overdue(date(2024, 3, 11)));
    }

    #[test]
    fn test_parse_due_date() {
        assert_eq!(parse_due_date("").unwrap(), None);
        assert_eq!(parse_due_date("   ").unwrap(), None);
        assert_eq!(parse_due_date(" 2024-01-01 ").unwrap(), Some(date(2024, 1, 1)));
        assert!(parse_due_date("01/01/2024").is_err());
    }
}
