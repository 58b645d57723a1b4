use std::borrow::Cow;
use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Result, TaskMasterError};

pub type TaskId = u64;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Tags offered by the add/edit form. Any other text is accepted as-is.
pub const SUGGESTED_TAGS: [&str; 3] = ["Work", "School", "Personal"];

/// Task priority as stored on disk.
///
/// Strings other than the four known levels are kept verbatim in `Other`
/// so a load/save cycle never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
    Other(String),
}

impl Priority {
    pub const LEVELS: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Other(s) => s,
        }
    }

    /// Sort rank, lower is more urgent. Unrecognized priorities rank last.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
            Self::Other(_) => 4,
        }
    }

    /// Parses user input, accepting only the four known levels (any case).
    pub fn parse_level(input: &str) -> Result<Self> {
        let wanted = input.trim();
        Self::LEVELS
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                TaskMasterError::InvalidInput(format!(
                    "Unknown priority '{}' (expected Critical, High, Medium or Low)",
                    input
                ))
            })
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Critical => Self::High,
            Self::High => Self::Medium,
            Self::Medium => Self::Low,
            Self::Low | Self::Other(_) => Self::Critical,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Self::Critical | Self::Other(_) => Self::Low,
            Self::High => Self::Critical,
            Self::Medium => Self::High,
            Self::Low => Self::Medium,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Low
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Critical" => Self::Critical,
            "High" => Self::High,
            "Medium" => Self::Medium,
            "Low" => Self::Low,
            _ => Self::Other(s),
        }
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        match p {
            Priority::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A due date, parsed once when read.
///
/// Text that is not a canonical `YYYY-MM-DD` date is kept in `Unparsed` so it
/// is written back unchanged. It still has a date if it parses leniently
/// (`2025-1-5`); text that does not parse is never overdue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DueDate {
    On(NaiveDate),
    Unparsed(String),
}

impl DueDate {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::On(d) => Some(*d),
            Self::Unparsed(s) => NaiveDate::parse_from_str(s, DATE_FORMAT).ok(),
        }
    }

    /// The string form used on disk and as the due-date sort key.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Self::On(d) => Cow::Owned(d.format(DATE_FORMAT).to_string()),
            Self::Unparsed(s) => Cow::Borrowed(s),
        }
    }

    /// Parses a due date typed by the user. Empty input clears the date.
    pub fn parse_input(input: &str, today: NaiveDate) -> Result<Option<Self>> {
        let input = input.trim();
        match input.to_lowercase().as_str() {
            "" | "none" => return Ok(None),
            "today" => return Ok(Some(Self::On(today))),
            "tomorrow" => return Ok(Some(Self::On(today + Duration::days(1)))),
            _ => {}
        }

        NaiveDate::parse_from_str(input, DATE_FORMAT)
            .map(|d| Some(Self::On(d)))
            .map_err(|_| {
                TaskMasterError::InvalidInput(format!(
                    "Invalid due date '{}' (expected YYYY-MM-DD, today or tomorrow)",
                    input
                ))
            })
    }
}

impl From<String> for DueDate {
    fn from(s: String) -> Self {
        match NaiveDate::parse_from_str(&s, DATE_FORMAT) {
            // "2025-1-5" parses too; keep it as text so it is written back unchanged
            Ok(d) if d.format(DATE_FORMAT).to_string() == s => Self::On(d),
            _ => Self::Unparsed(s),
        }
    }
}

impl From<DueDate> for String {
    fn from(d: DueDate) -> Self {
        match d {
            DueDate::On(date) => date.format(DATE_FORMAT).to_string(),
            DueDate::Unparsed(s) => s,
        }
    }
}

impl From<NaiveDate> for DueDate {
    fn from(d: NaiveDate) -> Self {
        Self::On(d)
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub due_date: Option<DueDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
    #[serde(default)]
    pub tag: Option<String>,
}

/// An explicit `null` reads the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            due_date: None,
            priority: Priority::default(),
            completed: false,
            tag: None,
        }
    }

    /// JSON mapping with keys `id, title, due_date, priority, completed, tag`.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuilds a task from its JSON mapping. `id` and `title` are required.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
impl Task {
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<DueDate>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let checkbox = if self.completed { '✔' } else { ' ' };
        let due = self
            .due_date
            .as_ref()
            .map(|d| d.as_key())
            .unwrap_or(Cow::Borrowed("none"));

        write!(
            f,
            "[{}] {}: {} (Priority: {}, Due: {})",
            checkbox, self.id, self.title, self.priority, due
        )?;

        if let Some(tag) = &self.tag {
            write!(f, " [Tag: {}]", tag)?;
        }
        Ok(())
    }
}

pub struct NewTask {
    pub title: String,
    pub priority: Priority,
    pub due_date: Option<DueDate>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<DueDate>>,
    pub tag: Option<Option<String>>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.tag.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new(1, "Buy milk");
        assert_eq!(task.priority, Priority::Low);
        assert!(!task.completed);
        assert!(task.due_date.is_none());
        assert!(task.tag.is_none());
    }

    #[test]
    fn test_to_value_keys() {
        let task = Task::new(1, "Buy milk")
            .with_priority(Priority::High)
            .with_due_date(date(2025, 1, 10))
            .with_tag("Personal");

        assert_eq!(
            task.to_value().unwrap(),
            json!({
                "id": 1,
                "title": "Buy milk",
                "due_date": "2025-01-10",
                "priority": "High",
                "completed": false,
                "tag": "Personal"
            })
        );
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let value = Task::new(4, "Plain").to_value().unwrap();
        assert_eq!(value["due_date"], Value::Null);
        assert_eq!(value["tag"], Value::Null);
    }

    #[test]
    fn test_round_trip_preserves_unusual_values() {
        let mut task = Task::new(9, "Odd one").with_priority(Priority::Other("Urgent".into()));
        task.due_date = Some(DueDate::from("N/A".to_string()));
        task.completed = true;

        let back = Task::from_value(task.to_value().unwrap()).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_from_value_defaults_missing_keys() {
        let task = Task::from_value(json!({"id": 3, "title": "Only required"})).unwrap();
        assert_eq!(task, Task::new(3, "Only required"));
    }

    #[test]
    fn test_from_value_treats_null_as_default() {
        let task = Task::from_value(json!({
            "id": 6,
            "title": "Nulls",
            "due_date": null,
            "priority": null,
            "completed": null,
            "tag": null
        }))
        .unwrap();
        assert_eq!(task, Task::new(6, "Nulls"));
    }

    #[test]
    fn test_from_value_requires_id_and_title() {
        let err = Task::from_value(json!({"title": "No id"})).unwrap_err();
        assert!(err.to_string().contains("id"));

        let err = Task::from_value(json!({"id": 1})).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_non_canonical_date_kept_verbatim() {
        let due = DueDate::from("2025-1-5".to_string());
        assert_eq!(due, DueDate::Unparsed("2025-1-5".into()));
        assert_eq!(due.date(), Some(date(2025, 1, 5)));
        assert_eq!(String::from(due), "2025-1-5");

        assert_eq!(DueDate::from("N/A".to_string()).date(), None);

        let due = DueDate::from("2025-01-05".to_string());
        assert_eq!(due.date(), Some(date(2025, 1, 5)));
    }

    #[test]
    fn test_parse_due_input() {
        let today = date(2025, 6, 1);
        assert_eq!(DueDate::parse_input("", today).unwrap(), None);
        assert_eq!(
            DueDate::parse_input("tomorrow", today).unwrap(),
            Some(DueDate::On(date(2025, 6, 2)))
        );
        assert_eq!(
            DueDate::parse_input("2025-12-24", today).unwrap(),
            Some(DueDate::On(date(2025, 12, 24)))
        );
        assert!(DueDate::parse_input("next week", today).is_err());
    }

    #[test]
    fn test_priority_parse_level() {
        assert_eq!(Priority::parse_level("critical").unwrap(), Priority::Critical);
        assert_eq!(Priority::parse_level("Medium").unwrap(), Priority::Medium);
        assert!(Priority::parse_level("urgent").is_err());
    }

    #[test]
    fn test_priority_cycle_covers_levels() {
        let mut p = Priority::Critical;
        for expected in Priority::LEVELS.iter().skip(1) {
            p = p.next();
            assert_eq!(&p, expected);
        }
        assert_eq!(p.next(), Priority::Critical);
        assert_eq!(Priority::Critical.previous(), Priority::Low);
    }

    #[test]
    fn test_display_matches_console_format() {
        let mut task = Task::new(2, "Write report")
            .with_priority(Priority::Critical)
            .with_due_date(date(2025, 3, 1))
            .with_tag("Work");
        task.completed = true;

        assert_eq!(
            task.to_string(),
            "[✔] 2: Write report (Priority: Critical, Due: 2025-03-01) [Tag: Work]"
        );
        assert_eq!(
            Task::new(5, "Nap").to_string(),
            "[ ] 5: Nap (Priority: Low, Due: none)"
        );
    }
}
